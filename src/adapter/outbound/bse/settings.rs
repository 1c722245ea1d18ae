//! BSE exchange configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;
use crate::error::{ConfigError, Result};

/// BSE provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BseConfig {
    /// Base URL of the BSE JSON API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Referer/Origin header expected by the API.
    #[serde(default = "default_referer")]
    pub referer: String,
    /// Top-level announcement category every subcategory lives under.
    #[serde(default = "default_category")]
    pub category: String,
    /// Subcategories broad enough to need keyword filtering.
    #[serde(default = "default_catch_all")]
    pub catch_all_subcategories: Vec<String>,
    /// Market segment ("equity" or "debt").
    #[serde(default = "default_segment")]
    pub segment: String,
    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://api.bseindia.com/BseIndiaAPI/api".to_string()
}

fn default_referer() -> String {
    "https://www.bseindia.com/".to_string()
}

fn default_category() -> String {
    "Company Update".to_string()
}

fn default_catch_all() -> Vec<String> {
    vec!["General".to_string()]
}

fn default_segment() -> String {
    "equity".to_string()
}

impl BseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "exchange.base_url",
            }
            .into());
        }
        if self.category.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "exchange.category",
            }
            .into());
        }
        if !matches!(self.segment.as_str(), "equity" | "debt") {
            return Err(ConfigError::InvalidValue {
                field: "exchange.segment",
                reason: format!("expected \"equity\" or \"debt\", got {:?}", self.segment),
            }
            .into());
        }
        Ok(())
    }

    /// Value of the `strType` query parameter for the configured segment.
    #[must_use]
    pub fn segment_code(&self) -> &'static str {
        match self.segment.as_str() {
            "debt" => "D",
            _ => "C",
        }
    }
}

impl Default for BseConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            referer: default_referer(),
            category: default_category(),
            catch_all_subcategories: default_catch_all(),
            segment: default_segment(),
            http: HttpConfig::default(),
        }
    }
}
