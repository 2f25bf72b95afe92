//! Search configuration.
//!
//! Provides [`SearchConfig`] with defaults taken from
//! [`sake_core::constants`]. The caps were inherited as fixed constants and
//! are exposed here so callers can tune them for their own latency budget.

use sake_core::constants::{DEFAULT_RESULT_CAP, DEFAULT_SEARCH_CAP};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("search cap must be non-zero")]
    ZeroSearchCap,
    #[error("result cap must be non-zero")]
    ZeroResultCap,
}

/// Caps and execution mode for a [`Decomposer`](crate::Decomposer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results produced by one search over all starting indices before it stops.
    pub search_cap: usize,
    /// Results returned by one decompose call.
    pub result_cap: usize,
    /// Fan starting indices out over the rayon thread pool.
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_cap: DEFAULT_SEARCH_CAP,
            result_cap: DEFAULT_RESULT_CAP,
            parallel: false,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_cap == 0 {
            return Err(ConfigError::ZeroSearchCap);
        }
        if self.result_cap == 0 {
            return Err(ConfigError::ZeroResultCap);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_caps() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.search_cap, 5_000);
        assert_eq!(cfg.result_cap, 10_000);
        assert!(!cfg.parallel);
    }

    #[test]
    fn default_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_caps_rejected() {
        let cfg = SearchConfig {
            search_cap: 0,
            ..SearchConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSearchCap));
        let cfg = SearchConfig {
            result_cap: 0,
            ..SearchConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroResultCap));
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let cfg: SearchConfig = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
        assert!(cfg.parallel);
        assert_eq!(cfg.search_cap, 5_000);
        assert_eq!(cfg.result_cap, 10_000);
    }
}
