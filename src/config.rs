//! Mining configuration.
//! TOML-based, resolved as: compiled defaults < config file < `PATE_*` env vars.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::item_sets::MiningLimits;

/// Thresholds and resource ceilings for a mining run.
///
/// Every field is optional; `effective_*` accessors supply the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MiningConfig {
    /// Minimum support fraction, in (0, 1]. Default: 0.01.
    pub min_support: Option<f64>,
    /// Minimum rule confidence, in [0, 1]. Default: 0.5.
    pub min_confidence: Option<f64>,
    /// Largest itemset size to mine. Default: unbounded.
    pub max_itemset_len: Option<usize>,
    /// Candidate ceiling per level. Default: 1_000_000.
    pub max_candidates: Option<usize>,
    /// Count transactions on the rayon pool. Default: true.
    pub parallel: Option<bool>,
    /// Row count below which counting stays sequential. Default: 4096.
    pub parallel_min_transactions: Option<usize>,
    /// Accept a matrix with no transactions or no items. Default: true.
    pub allow_empty_input: Option<bool>,
}

impl MiningConfig {
    /// Load `path`, apply `PATE_*` environment overrides, then validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string. No environment overrides.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `PATE_MIN_SUPPORT`, `PATE_MIN_CONFIDENCE`, `PATE_MAX_ITEMSET_LEN`,
    /// `PATE_MAX_CANDIDATES` and `PATE_PARALLEL` when set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_value("PATE_MIN_SUPPORT")? {
            self.min_support = Some(v);
        }
        if let Some(v) = env_value("PATE_MIN_CONFIDENCE")? {
            self.min_confidence = Some(v);
        }
        if let Some(v) = env_value("PATE_MAX_ITEMSET_LEN")? {
            self.max_itemset_len = Some(v);
        }
        if let Some(v) = env_value("PATE_MAX_CANDIDATES")? {
            self.max_candidates = Some(v);
        }
        if let Some(v) = env_value("PATE_PARALLEL")? {
            self.parallel = Some(v);
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(support) = self.min_support {
            if !(support > 0.0 && support <= 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "min_support".to_string(),
                    message: "must be greater than 0.0 and at most 1.0".to_string(),
                });
            }
        }
        if let Some(confidence) = self.min_confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(ConfigError::ValidationFailed {
                    field: "min_confidence".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if self.max_itemset_len == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "max_itemset_len".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.max_candidates == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "max_candidates".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the effective minimum support, defaulting to 0.01.
    pub fn effective_min_support(&self) -> f64 {
        self.min_support.unwrap_or(0.01)
    }

    /// Returns the effective minimum confidence, defaulting to 0.5.
    pub fn effective_min_confidence(&self) -> f64 {
        self.min_confidence.unwrap_or(0.5)
    }

    pub fn effective_max_candidates(&self) -> usize {
        self.max_candidates.unwrap_or(1_000_000)
    }

    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    pub fn effective_parallel_min_transactions(&self) -> usize {
        self.parallel_min_transactions.unwrap_or(4096)
    }

    pub fn effective_allow_empty_input(&self) -> bool {
        self.allow_empty_input.unwrap_or(true)
    }

    pub fn limits(&self) -> MiningLimits {
        MiningLimits {
            max_itemset_len: self.max_itemset_len,
            max_candidates: Some(self.effective_max_candidates()),
        }
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::ValidationFailed {
                field: key.to_string(),
                message: format!("cannot parse {raw:?}"),
            }),
        Err(_) => Ok(None),
    }
}
