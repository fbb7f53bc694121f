use futures::future::abortable;
use log::warn;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::models::Session;
use crate::subscription::listen_for_balance_alerts;

/// Keeps a balance alert subscription open for as long as `session` is set.
#[hook]
pub fn use_balance_alerts(session: Option<Session>, on_alert: Callback<String>) {
    use_effect_with(session, move |session| {
        let abort = session.clone().map(|session| {
            let (listener, handle) = abortable(listen_for_balance_alerts(session, on_alert));
            spawn_local(async move {
                if let Ok(Err(e)) = listener.await {
                    warn!("Error during balance alert subscription: {}", e);
                }
            });
            handle
        });

        move || {
            if let Some(handle) = abort {
                handle.abort();
            }
        }
    });
}
