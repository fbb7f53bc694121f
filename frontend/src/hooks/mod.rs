pub mod use_balance_alerts;
pub mod use_session;

pub use use_balance_alerts::*;
pub use use_session::*;
