//! Stable error codes for callers that match on strings (logs, exported reports).

/// Every error enum in the crate maps its variants to a stable code.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "INVALID_THRESHOLD").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_THRESHOLD: &str = "INVALID_THRESHOLD";
pub const EMPTY_INPUT: &str = "EMPTY_INPUT";
pub const RULES_BEFORE_MINING: &str = "RULES_BEFORE_MINING";
pub const RULES_NOT_DERIVED: &str = "RULES_NOT_DERIVED";
pub const RESOURCE_LIMIT: &str = "RESOURCE_LIMIT";
pub const UNKNOWN_ITEM: &str = "UNKNOWN_ITEM";
pub const MALFORMED_INPUT: &str = "MALFORMED_INPUT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
