//! Error handling for pate.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod mining_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use mining_error::{MiningError, MiningResult};
