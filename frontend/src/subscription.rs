//! Balance-change alerts over the `graphql-transport-ws` protocol.

use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{futures::WebSocket, Message};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use yew::Callback;

use crate::config::get_subscription_url;
use crate::error::ApiError;
use crate::models::Session;

const PROTOCOL: &str = "graphql-transport-ws";
const SUBSCRIPTION_ID: &str = "balance-alert";

pub const BALANCE_ALERT: &str = r#"
subscription BalanceChangeAlert {
  caasBalanceAlert { currencyKey }
}"#;

#[derive(Serialize)]
struct InitPayload {
    authorization: String,
}

#[derive(Serialize)]
struct SubscribePayload<'a> {
    query: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage<'a> {
    ConnectionInit { payload: InitPayload },
    Subscribe { id: &'a str, payload: SubscribePayload<'a> },
    Pong,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceAlert {
    currency_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlertData {
    caas_balance_alert: Option<BalanceAlert>,
}

#[derive(Deserialize)]
struct NextPayload {
    data: Option<AlertData>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ServerMessage {
    ConnectionAck,
    Next { id: String, payload: NextPayload },
    Error { id: String, payload: serde_json::Value },
    Complete { id: String },
    Ping,
    Pong,
}

/// What the listener should do after one server frame.
#[derive(Debug, PartialEq)]
enum Step {
    Subscribe,
    Alert(String),
    Pong,
    Ignore,
    Finish,
}

fn encode(message: &ClientMessage) -> Result<Message, ApiError> {
    serde_json::to_string(message)
        .map(Message::Text)
        .map_err(|e| ApiError::Protocol(e.to_string()))
}

fn step(text: &str) -> Step {
    match serde_json::from_str::<ServerMessage>(text) {
        Ok(ServerMessage::ConnectionAck) => Step::Subscribe,
        Ok(ServerMessage::Next { payload, .. }) => {
            match payload.data.and_then(|d| d.caas_balance_alert).and_then(|a| a.currency_key) {
                Some(currency_key) => Step::Alert(currency_key),
                None => {
                    error!("No currencyKey in event: {}", text);
                    Step::Ignore
                }
            }
        }
        Ok(ServerMessage::Error { id, payload }) => {
            error!("Subscription {} failed: {}", id, payload);
            Step::Finish
        }
        Ok(ServerMessage::Complete { id }) => {
            info!("Subscription {} complete", id);
            Step::Finish
        }
        Ok(ServerMessage::Ping) => Step::Pong,
        Ok(ServerMessage::Pong) => Step::Ignore,
        Err(e) => {
            warn!("Unrecognized subscription message: {}", e);
            Step::Ignore
        }
    }
}

/// Listens for balance alerts until the server completes the subscription
/// or the socket closes. Each alert's currency key goes to `on_alert`.
pub async fn listen_for_balance_alerts(
    session: Session,
    on_alert: Callback<String>,
) -> Result<(), ApiError> {
    let url = get_subscription_url();
    debug!("Connecting to balance alerts at {}", url);
    let ws = WebSocket::open_with_protocol(&url, PROTOCOL)
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let (mut write, mut read) = ws.split();

    let init = ClientMessage::ConnectionInit {
        payload: InitPayload { authorization: session.authorization() },
    };
    write
        .send(encode(&init)?)
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    while let Some(message) = read.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Bytes(_)) => continue,
            Err(e) => return Err(ApiError::Network(e.to_string())),
        };

        let reply = match step(&text) {
            Step::Subscribe => ClientMessage::Subscribe {
                id: SUBSCRIPTION_ID,
                payload: SubscribePayload { query: BALANCE_ALERT },
            },
            Step::Pong => ClientMessage::Pong,
            Step::Alert(currency_key) => {
                on_alert.emit(currency_key);
                continue;
            }
            Step::Ignore => continue,
            Step::Finish => break,
        };
        write
            .send(encode(&reply)?)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
    }

    debug!("Balance alert socket closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(message: &ClientMessage) -> serde_json::Value {
        match encode(message).unwrap() {
            Message::Text(text) => serde_json::from_str(&text).unwrap(),
            Message::Bytes(_) => panic!("expected a text frame"),
        }
    }

    #[test]
    fn test_connection_init_carries_session() {
        let init = ClientMessage::ConnectionInit {
            payload: InitPayload { authorization: "session:abc".to_string() },
        };
        assert_eq!(
            text(&init),
            serde_json::json!({"type": "connection_init", "payload": {"authorization": "session:abc"}})
        );
        assert_eq!(text(&ClientMessage::Pong), serde_json::json!({"type": "pong"}));
    }

    #[test]
    fn test_server_steps() {
        assert_eq!(step(r#"{"type":"connection_ack","payload":{}}"#), Step::Subscribe);
        assert_eq!(step(r#"{"type":"ping"}"#), Step::Pong);
        assert_eq!(
            step(r#"{"type":"next","id":"balance-alert","payload":{"data":{"caasBalanceAlert":{"currencyKey":"BTC"}}}}"#),
            Step::Alert("BTC".to_string())
        );
        assert_eq!(
            step(r#"{"type":"next","id":"balance-alert","payload":{"data":{"caasBalanceAlert":null}}}"#),
            Step::Ignore
        );
        assert_eq!(step(r#"{"type":"complete","id":"balance-alert"}"#), Step::Finish);
        assert_eq!(step(r#"{"type":"error","id":"balance-alert","payload":[]}"#), Step::Finish);
        assert_eq!(step("not json"), Step::Ignore);
    }
}
