//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use first_filings::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("first-filings.toml")?;
//!     config.logging.init()?;
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::retry::RetryConfig;
use crate::adapter::outbound::bse::BseConfig;
use crate::adapter::outbound::nse::NseConfig;
use crate::domain::{CategoryRule, CategoryTable};
use crate::error::{ConfigError, Result};

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "first-filings.toml";

/// Supported exchanges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    #[default]
    Bse,
    Nse,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bse => write!(f, "bse"),
            Self::Nse => write!(f, "nse"),
        }
    }
}

/// Exchange-specific configuration variant.
///
/// The active variant is determined by the `type` field in the TOML config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExchangeConfig {
    Bse(BseConfig),
    Nse(NseConfig),
}

impl ExchangeConfig {
    #[must_use]
    pub fn exchange(&self) -> Exchange {
        match self {
            Self::Bse(_) => Exchange::Bse,
            Self::Nse(_) => Exchange::Nse,
        }
    }

    /// Default settings for `exchange`.
    #[must_use]
    pub fn defaults_for(exchange: Exchange) -> Self {
        match exchange {
            Exchange::Bse => Self::Bse(BseConfig::default()),
            Exchange::Nse => Self::Nse(NseConfig::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Bse(bse) => bse.validate(),
            Self::Nse(nse) => nse.validate(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::defaults_for(Exchange::default())
    }
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// JSON archive every scan report is appended to.
    #[serde(default = "default_archive")]
    pub archive: PathBuf,
}

fn default_archive() -> PathBuf {
    PathBuf::from("first_filings_archive.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            archive: default_archive(),
        }
    }
}

fn default_categories() -> Vec<CategoryRule> {
    CategoryTable::default().rules().to_vec()
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub exchange: ExchangeConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    /// Ordered category table. Replaces the built-in table entirely when given.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryRule>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange: ExchangeConfig::default(),
            retry: RetryConfig::default(),
            categories: default_categories(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if given (it must exist), else [`DEFAULT_CONFIG_PATH`]
    /// if present, else built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Switch to `exchange`, keeping the current settings if it is already
    /// the configured one.
    pub fn select_exchange(&mut self, exchange: Exchange) {
        if self.exchange.exchange() != exchange {
            self.exchange = ExchangeConfig::defaults_for(exchange);
        }
    }

    /// The category table shared by clients and the analyzer.
    #[must_use]
    pub fn category_table(&self) -> Arc<CategoryTable> {
        Arc::new(CategoryTable::new(self.categories.clone()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(ConfigError::MissingField { field: "categories" }.into());
        }
        for (index, rule) in self.categories.iter().enumerate() {
            if rule.label.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "categories.label",
                    reason: format!("entry {index} has an empty label"),
                }
                .into());
            }
            if self.categories[..index].iter().any(|r| r.label == rule.label) {
                return Err(ConfigError::InvalidValue {
                    field: "categories.label",
                    reason: format!("duplicate label {:?}", rule.label),
                }
                .into());
            }
            if rule.subcategories.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "categories.subcategories",
                    reason: format!("{:?} has no subcategories", rule.label),
                }
                .into());
            }
        }

        self.exchange.validate()?;
        self.retry.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
