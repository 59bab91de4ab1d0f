//! Tracker configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How `#elif` directives are turned into events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElifPolicy {
    /// Treat `#elif` as an unrelated `Open`, never as a match.
    #[default]
    AsOpen,
    /// Drop `#elif` entirely.
    Ignore,
}

/// Tracker configuration.
///
/// # Example
///
/// ```rust
/// use pp_region::config::{ElifPolicy, TrackerConfig};
///
/// let config = TrackerConfig::from_json(r#"{ "symbol": "USE_GPU", "elif_policy": "ignore" }"#)
///     .unwrap();
/// assert_eq!(config.symbol, "USE_GPU");
/// assert!(!config.record_history);
/// assert_eq!(config.elif_policy, ElifPolicy::Ignore);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Configuration macro whose conditionals are tracked
    pub symbol: String,

    /// Keep a record of every matched transition
    pub record_history: bool,

    /// Classification of `#elif`
    pub elif_policy: ElifPolicy,
}

impl TrackerConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_treats_elif_as_open() {
        let config = TrackerConfig::default();
        assert_eq!(config.elif_policy, ElifPolicy::AsOpen);
        assert!(config.symbol.is_empty());
        assert!(!config.record_history);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = TrackerConfig::from_json(r#"{ "symbol": "DEBUG" }"#).unwrap();
        assert_eq!(config, TrackerConfig::new("DEBUG"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = TrackerConfig::from_json("{ symbol: ");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn unknown_elif_policy_is_rejected() {
        let result = TrackerConfig::from_json(r#"{ "elif_policy": "match" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn config_survives_json() {
        let config = TrackerConfig {
            symbol: "HAVE_SSE".to_string(),
            record_history: true,
            elif_policy: ElifPolicy::Ignore,
        };
        let json = config.to_json().unwrap();
        assert_eq!(TrackerConfig::from_json(&json).unwrap(), config);
    }
}
