//! Retry and backoff configuration for provider requests.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Backoff settings for the retry executor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Delay before the first retry (milliseconds).
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound on any single delay (milliseconds).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each failed attempt.
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    /// Randomize each delay between the minimum and its exponential value.
    #[serde(default = "default_jitter")]
    pub jitter: bool,
}

const fn default_max_attempts() -> u32 {
    15
}

const fn default_min_delay_ms() -> u64 {
    1000 // 1 second
}

const fn default_max_delay_ms() -> u64 {
    60000 // 60 seconds
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_jitter() -> bool {
    true
}

impl RetryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.min_delay_ms > self.max_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "retry.min_delay_ms",
                reason: format!(
                    "{} exceeds max_delay_ms {}",
                    self.min_delay_ms, self.max_delay_ms
                ),
            }
            .into());
        }
        if self.multiplier.is_nan() || self.multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.multiplier",
                reason: format!("{} is below 1.0", self.multiplier),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            multiplier: default_multiplier(),
            jitter: default_jitter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_match_documented_values() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 15);
        assert_eq!(config.min_delay_ms, 1000);
        assert_eq!(config.max_delay_ms, 60000);
        assert!((config.multiplier - 2.0).abs() < f64::EPSILON);
        assert!(config.jitter);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_attempts_rejected() {
        let config = RetryConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "retry.max_attempts",
                ..
            }))
        ));
    }

    #[test]
    fn inverted_delay_bounds_rejected() {
        let config = RetryConfig {
            min_delay_ms: 5000,
            max_delay_ms: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shrinking_multiplier_rejected() {
        let config = RetryConfig {
            multiplier: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
