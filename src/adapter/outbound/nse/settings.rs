//! NSE exchange configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;
use crate::error::{ConfigError, Result};

/// NSE provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NseConfig {
    /// Site root. Also visited once per client to obtain session cookies.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Announcement index ("equities", "debt", "sme", ...).
    #[serde(default = "default_index")]
    pub index: String,
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://www.nseindia.com".to_string()
}

fn default_index() -> String {
    "equities".to_string()
}

impl NseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "exchange.base_url",
            }
            .into());
        }
        if self.index.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "exchange.index",
            }
            .into());
        }
        Ok(())
    }
}

impl Default for NseConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            index: default_index(),
            http: HttpConfig::default(),
        }
    }
}
