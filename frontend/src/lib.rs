pub mod api;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;
pub mod pages;
pub mod subscription;

use log::{debug, error};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::{use_balance_alerts, use_session, SessionState};
use crate::pages::wheel_game::wheel_utils::Alert;
use crate::pages::wheel_game::WheelPage;

#[function_component(App)]
pub fn app() -> Html {
    let session_state = use_session();

    // Refetch every balance whenever the casino reports a change
    let on_alert = {
        let session_state = session_state.clone();
        Callback::from(move |currency_key: String| {
            let Some(session) = session_state.session().cloned() else {
                return;
            };
            debug!("Balance changed for {}", currency_key);
            let session_state = session_state.clone();
            spawn_local(async move {
                match api::fetch_balances(&session).await {
                    Ok(balances) => session_state.set(SessionState::Ready { session, balances }),
                    Err(e) => error!("Error fetching user balances: {}", e),
                }
            });
        })
    };
    use_balance_alerts(session_state.session().cloned(), on_alert);

    let body = match &*session_state {
        SessionState::Loading => html! { <Alert message="Loading..." tone="blue" /> },
        SessionState::Failed(message) => html! { <Alert message={message.clone()} /> },
        SessionState::Ready { session, balances } => html! {
            <>
                if balances.is_empty() {
                    <Alert message="Deposit money into this experience to begin betting." tone="yellow" />
                }
                <WheelPage session={session.clone()} balances={balances.clone()} />
            </>
        },
    };

    html! {
        <div class="min-h-screen w-full p-3">
            <div class="mx-auto max-w-5xl">
                { body }
            </div>
        </div>
    }
}
