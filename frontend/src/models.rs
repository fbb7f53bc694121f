use serde::{Deserialize, Serialize};
use shared::validation::display_decimals;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub uname: String,
    pub experience_id: String,
    pub user_id: String,
}

impl Session {
    pub fn authorization(&self) -> String {
        format!("session:{}", self.session_id)
    }
}

/// A user balance. `amount` is in base units; divide by `display_unit_scale` to show it.
#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub amount: f64,
    pub currency_key: String,
    pub display_unit_name: String,
    pub display_unit_scale: f64,
}

impl Balance {
    pub fn display_amount(&self) -> f64 {
        self.amount / self.display_unit_scale
    }

    pub fn formatted(&self) -> String {
        format!(
            "{:.*} {}",
            display_decimals(self.display_unit_scale),
            self.display_amount(),
            self.display_unit_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_formatting() {
        let balance = Balance {
            amount: 12345.0,
            currency_key: "BTC".to_string(),
            display_unit_name: "bits".to_string(),
            display_unit_scale: 100.0,
        };
        assert_eq!(balance.display_amount(), 123.45);
        assert_eq!(balance.formatted(), "123.45 bits");
    }

    #[test]
    fn test_session_authorization_header() {
        let session: Session = serde_json::from_value(serde_json::json!({
            "sessionId": "abc",
            "uname": "alice",
            "experienceId": "e1",
            "userId": "u1",
        }))
        .unwrap();
        assert_eq!(session.authorization(), "session:abc");
    }
}
