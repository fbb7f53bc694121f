use gloo_net::http::Request;
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{WheelBetRequest, WheelBetResponse};

use crate::config::get_graphql_url;
use crate::error::ApiError;
use crate::models::{Balance, Session};

pub const AUTHENTICATE: &str = r#"
mutation Authenticate($casinoBaseUrl: String!, $userToken: String!) {
  caasAuthenticate(input: { casinoBaseUrl: $casinoBaseUrl, userToken: $userToken }) {
    success { sessionId uname experienceId userId }
    query {
      caasCurrentUser {
        balances {
          amount
          currencyKey
          caasCurrencyByCurrencyKeyAndCasinoId { displayUnitName displayUnitScale }
        }
      }
    }
  }
}"#;

pub const GET_BALANCES: &str = r#"
query GetBalances {
  caasCurrentUser {
    balances {
      amount
      currencyKey
      caasCurrencyByCurrencyKeyAndCasinoId { displayUnitName displayUnitScale }
    }
  }
}"#;

pub const MAKE_WHEEL_BET: &str = r#"
mutation MakeWheelBet($wager: Float!, $currency: String!, $risk: Risk!, $segments: Int!) {
  makeWheelBet(input: { wager: $wager, currency: $currency, risk: $risk, segments: $segments }) {
    multiplier
  }
}"#;

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCurrency {
    display_unit_name: String,
    display_unit_scale: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBalance {
    amount: f64,
    currency_key: String,
    caas_currency_by_currency_key_and_casino_id: Option<RawCurrency>,
}

#[derive(Deserialize)]
struct CurrentUser {
    #[serde(default)]
    balances: Vec<Option<RawBalance>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
    caas_current_user: Option<CurrentUser>,
}

#[derive(Deserialize)]
struct AuthenticatePayload {
    success: Option<Session>,
    query: Option<UserQuery>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticateData {
    caas_authenticate: Option<AuthenticatePayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MakeWheelBetData {
    make_wheel_bet: Option<WheelBetResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticateVariables<'a> {
    casino_base_url: &'a str,
    user_token: &'a str,
}

fn decode<T>(response: GraphQlResponse<T>) -> Result<T, ApiError> {
    if let Some(err) = response.errors.into_iter().next() {
        return Err(ApiError::GraphQl(err.message));
    }
    response.data.ok_or(ApiError::EmptyResponse)
}

fn into_balances(user: Option<CurrentUser>) -> Vec<Balance> {
    user.map(|user| user.balances)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(|raw| {
            let currency = raw.caas_currency_by_currency_key_and_casino_id?;
            Some(Balance {
                amount: raw.amount,
                currency_key: raw.currency_key,
                display_unit_name: currency.display_unit_name,
                display_unit_scale: currency.display_unit_scale,
            })
        })
        .collect()
}

async fn send<V, T>(session: Option<&Session>, query: &str, variables: V) -> Result<T, ApiError>
where
    V: Serialize,
    T: DeserializeOwned,
{
    let mut request = Request::post(&get_graphql_url());
    if let Some(session) = session {
        request = request.header("Authorization", &session.authorization());
    }

    let response = request.json(&GraphQlRequest { query, variables })?.send().await?;
    match response.json::<GraphQlResponse<T>>().await {
        Ok(body) => decode(body),
        Err(_) if !response.ok() => Err(ApiError::Status(response.status())),
        Err(e) => Err(e.into()),
    }
}

pub async fn authenticate(
    casino_base_url: &str,
    user_token: &str,
) -> Result<(Session, Vec<Balance>), ApiError> {
    let data: AuthenticateData = send(
        None,
        AUTHENTICATE,
        AuthenticateVariables { casino_base_url, user_token },
    )
    .await?;

    let payload = data.caas_authenticate.ok_or(ApiError::EmptyResponse)?;
    let session = payload.success.ok_or_else(|| {
        ApiError::GraphQl("Authentication failed due to empty response".to_string())
    })?;
    let balances = into_balances(payload.query.and_then(|q| q.caas_current_user));
    debug!("Authenticated as {} with {} balances", session.uname, balances.len());
    Ok((session, balances))
}

pub async fn fetch_balances(session: &Session) -> Result<Vec<Balance>, ApiError> {
    let data: UserQuery = send(Some(session), GET_BALANCES, serde_json::json!({})).await?;
    Ok(into_balances(data.caas_current_user))
}

/// Places a bet and returns the multiplier the server settled it at.
pub async fn make_wheel_bet(session: &Session, bet: &WheelBetRequest) -> Result<f64, ApiError> {
    let data: MakeWheelBetData = send(Some(session), MAKE_WHEEL_BET, bet).await?;
    match data.make_wheel_bet {
        Some(response) => Ok(response.multiplier),
        None => {
            error!("makeWheelBet returned no payload");
            Err(ApiError::EmptyResponse)
        }
    }
}
