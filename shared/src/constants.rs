use std::f64::consts::TAU;
use std::time::Duration;

pub const SPIN_DURATION: Duration = Duration::from_millis(1000);
pub const REVEAL_DURATION: Duration = Duration::from_millis(500);

// Whole turns added on top of the forward distance to the landing angle
pub const FULL_ROTATIONS: u32 = 3;

// Pointer sits at the top of the wheel; angles grow clockwise
pub const POINTER_ANGLE: f64 = 0.0;

pub const REVEAL_AMPLITUDE: f64 = 1.05;
pub const REVEAL_PERIOD: f64 = 0.5;

pub const FULL_TURN: f64 = TAU;

pub const BET_SOUND_VOLUME: f64 = 0.5;
pub const WIN_SOUND_VOLUME: f64 = 1.0;

pub const INVALID_WAGER_ERROR: &str = "Invalid wager amount";
pub const INVALID_CURRENCY_ERROR: &str = "Invalid currency";
