use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Animation tunables for a wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub spin_duration_ms: u64,
    pub reveal_duration_ms: u64,
    /// Minimum whole turns per spin.
    pub full_rotations: u32,
    /// Where the fixed pointer sits, in radians clockwise from the top.
    pub pointer_angle: f64,
    pub reveal_amplitude: f64,
    pub reveal_period: f64,
}

impl WheelConfig {
    pub fn spin_duration(&self) -> Duration {
        Duration::from_millis(self.spin_duration_ms)
    }

    pub fn reveal_duration(&self) -> Duration {
        Duration::from_millis(self.reveal_duration_ms)
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION.as_millis() as u64,
            reveal_duration_ms: REVEAL_DURATION.as_millis() as u64,
            full_rotations: FULL_ROTATIONS,
            pointer_angle: POINTER_ANGLE,
            reveal_amplitude: REVEAL_AMPLITUDE,
            reveal_period: REVEAL_PERIOD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: WheelConfig = serde_json::from_str(r#"{"spin_duration_ms": 2500}"#).unwrap();
        assert_eq!(config.spin_duration(), Duration::from_millis(2500));
        assert_eq!(config.full_rotations, FULL_ROTATIONS);
        assert_eq!(config.reveal_duration(), REVEAL_DURATION);
    }
}
