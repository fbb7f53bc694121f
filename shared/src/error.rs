use thiserror::Error;

use crate::multiplier_table::RiskLevel;

/// Faults raised by the wheel core.
///
/// None of these leave the wheel mid-rotation: every error is returned before
/// the spin state leaves `Idle`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    /// The server reported a multiplier the local table does not contain.
    #[error("multiplier {multiplier} is not on the wheel (payout table out of sync)")]
    NoMatchingSegment { multiplier: f64 },
    #[error("cannot change multipliers while spinning")]
    ReconfigurationWhileSpinning,
    #[error("segment index {index} out of range for a wheel of {len} segments")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no color configured for multiplier {multiplier}")]
    UnknownMultiplier { multiplier: f64 },
    #[error("unsupported segment count: {count}")]
    InvalidSegmentCount { count: usize },
    #[error("payout table has no {segments}-segment wheel for {risk} risk")]
    MissingTableEntry { risk: RiskLevel, segments: usize },
    #[error("spin was abandoned before it landed")]
    SpinAbandoned,
}

pub type Result<T> = std::result::Result<T, WheelError>;
