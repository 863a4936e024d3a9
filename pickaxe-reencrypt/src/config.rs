use std::time::Duration;

use serde::Deserialize;

use crate::error::ReencryptError;

/// Client settings. Every field except `chain_id` has a default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReencryptConfig {
    pub chain_id: String,
    /// Per-attempt deadline
    pub request_timeout_ms: u64,
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    /// How many times a handle that moved under us is fetched again
    pub max_stale_refetches: u32,
}

impl Default for ReencryptConfig {
    fn default() -> Self {
        Self {
            chain_id: String::new(),
            request_timeout_ms: 10_000,
            max_attempts: 3,
            initial_backoff_ms: 250,
            max_backoff_ms: 4_000,
            max_stale_refetches: 2,
        }
    }
}

impl ReencryptConfig {
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            ..Self::default()
        }
    }

    pub fn from_json(input: &str) -> Result<Self, ReencryptError> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ReencryptError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReencryptError> {
        if self.chain_id.is_empty() {
            return Err(ReencryptError::InvalidConfig(
                "chain_id is required".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ReencryptError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(ReencryptError::InvalidConfig(
                "request_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Delay before retry number `retry` (1-based), doubling up to the cap.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u64 << retry.saturating_sub(1).min(20);
        Duration::from_millis(
            self.initial_backoff_ms
                .saturating_mul(factor)
                .min(self.max_backoff_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_fills_defaults() {
        let config = ReencryptConfig::from_json(r#"{"chain_id":"pickaxe-1"}"#).unwrap();
        assert_eq!(config.chain_id, "pickaxe-1");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn from_json_rejects_bad_input() {
        assert!(matches!(
            ReencryptConfig::from_json("{}"),
            Err(ReencryptError::InvalidConfig(_))
        ));
        assert!(matches!(
            ReencryptConfig::from_json(r#"{"chain_id":"c","max_attempts":0}"#),
            Err(ReencryptError::InvalidConfig(_))
        ));
        assert!(ReencryptConfig::from_json(r#"{"chain_id":"c","retries":4}"#).is_err());
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let config = ReencryptConfig::new("c");
        assert_eq!(config.backoff(1), Duration::from_millis(250));
        assert_eq!(config.backoff(2), Duration::from_millis(500));
        assert_eq!(config.backoff(3), Duration::from_millis(1_000));
        assert_eq!(config.backoff(10), Duration::from_millis(4_000));
    }
}
