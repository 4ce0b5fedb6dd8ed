//! Mining and rule-derivation errors.

use super::error_code::{self, ErrorCode};

/// Errors surfaced by the itemset miner, the rule generator and the analyzer.
///
/// None of these are retried internally: mining is deterministic, so a retry
/// reproduces the same failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MiningError {
    #[error("Invalid {name} {value}: must be in {range}")]
    InvalidThreshold {
        name: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("Transaction matrix has no transactions or no items")]
    EmptyInput,

    #[error("Association rules requested before frequent itemsets were mined")]
    RulesRequestedBeforeMining,

    #[error("Association rules queried before they were derived from the mined itemsets")]
    RulesNotDerived,

    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("Resource limit exceeded: {limit} is {max}, reached {value}")]
    ResourceLimitExceeded {
        limit: &'static str,
        max: usize,
        value: usize,
    },

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl ErrorCode for MiningError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidThreshold { .. } => error_code::INVALID_THRESHOLD,
            Self::EmptyInput => error_code::EMPTY_INPUT,
            Self::RulesRequestedBeforeMining => error_code::RULES_BEFORE_MINING,
            Self::RulesNotDerived => error_code::RULES_NOT_DERIVED,
            Self::InvalidConfig { .. } => error_code::CONFIG_ERROR,
            Self::ResourceLimitExceeded { .. } => error_code::RESOURCE_LIMIT,
            Self::UnknownItem(_) => error_code::UNKNOWN_ITEM,
            Self::RaggedRow { .. } => error_code::MALFORMED_INPUT,
        }
    }
}

pub type MiningResult<T> = Result<T, MiningError>;
