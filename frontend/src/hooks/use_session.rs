use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::config::{get_casino_base_url, get_user_token};
use crate::error::ApiError;
use crate::models::{Balance, Session};

#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Loading,
    Failed(String),
    Ready { session: Session, balances: Vec<Balance> },
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Ready { session, .. } => Some(session),
            _ => None,
        }
    }
}

async fn bootstrap() -> Result<(Session, Vec<Balance>), ApiError> {
    let user_token = get_user_token()
        .ok_or_else(|| ApiError::Config("No userToken found in URL".to_string()))?;
    let casino_base_url = get_casino_base_url()
        .ok_or_else(|| ApiError::Config("No casinoBaseUrl found in parent URL".to_string()))?;
    api::authenticate(&casino_base_url, &user_token).await
}

/// Authenticates against the embedding casino once, on mount.
#[hook]
pub fn use_session() -> UseStateHandle<SessionState> {
    let state = use_state(|| SessionState::Loading);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match bootstrap().await {
                    Ok((session, balances)) => {
                        info!("Session ready for {}", session.uname);
                        state.set(SessionState::Ready { session, balances });
                    }
                    Err(e) => {
                        error!("Authentication failed: {}", e);
                        state.set(SessionState::Failed(e.to_string()));
                    }
                }
            });
            || ()
        });
    }

    state
}
