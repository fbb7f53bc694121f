pub mod config;
pub mod constants;
pub mod error;
pub mod multiplier_table;
pub mod result_reveal;
pub mod segment_selector;
pub mod shared_wheel_game;
pub mod spin_animator;
pub mod spin_controller;
pub mod surface;
pub mod validation;

pub use config::WheelConfig;
pub use error::{Result, WheelError};
pub use multiplier_table::{Color, MultiplierSequence, MultiplierTable, RiskLevel, SegmentCount, TableEntry};
pub use result_reveal::ResultDisplay;
pub use shared_wheel_game::{WheelBetRequest, WheelBetResponse, WheelGame};
pub use spin_controller::{SpinController, SpinHandle, SpinOutcome, SpinState};
pub use surface::{RecordingSurface, Sound, SurfaceEvent, WheelSurface};
