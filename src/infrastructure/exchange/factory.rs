//! Exchange component factory.
//!
//! Provides [`ExchangeFactory`] for wiring the configured exchange client and
//! the analyzer on top of it.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::bse::BseClient;
use crate::adapter::outbound::nse::NseClient;
use crate::application::{FilingScanner, FirstFilingAnalyzer, RetryPolicy};
use crate::domain::CategoryTable;
use crate::infrastructure::config::settings::{Config, ExchangeConfig};
use crate::port::ExchangeClient;

/// Factory for creating exchange-specific components.
///
/// All factory methods are static; no instance state is required.
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Create the client for the configured exchange.
    #[must_use]
    pub fn create_client(config: &Config) -> Arc<dyn ExchangeClient> {
        Self::create_client_with(config, config.category_table())
    }

    /// Create the client for the configured exchange over `categories`.
    #[must_use]
    pub fn create_client_with(config: &Config, categories: Arc<CategoryTable>) -> Arc<dyn ExchangeClient> {
        let retry = RetryPolicy::new(config.retry.clone());

        let client: Arc<dyn ExchangeClient> = match &config.exchange {
            ExchangeConfig::Bse(bse) => Arc::new(BseClient::from_config(bse, categories, retry)),
            ExchangeConfig::Nse(nse) => Arc::new(NseClient::from_config(nse, categories, retry)),
        };
        info!(exchange = client.exchange_name(), "Exchange client ready");
        client
    }

    /// Create an analyzer over the configured exchange.
    #[must_use]
    pub fn create_analyzer(config: &Config) -> FirstFilingAnalyzer {
        Self::create_analyzer_with(config, config.category_table())
    }

    /// Create an analyzer whose client and lookups share `categories`.
    #[must_use]
    pub fn create_analyzer_with(config: &Config, categories: Arc<CategoryTable>) -> FirstFilingAnalyzer {
        let client = Self::create_client_with(config, Arc::clone(&categories));
        FirstFilingAnalyzer::new(client, categories)
    }

    #[must_use]
    pub fn create_scanner(config: &Config) -> FilingScanner {
        FilingScanner::new(Self::create_analyzer(config))
    }
}
