use std::sync::Arc;

use first_filings::adapter::outbound::bse::{BseClient, BseConfig};
use first_filings::application::{FirstFilingAnalyzer, RetryPolicy};
use first_filings::domain::CategoryTable;
use first_filings::port::ExchangeClient;
use first_filings::testkit;
use first_filings::testkit::provider::ScriptedBseApi;

/// A BSE client over a scripted transport, with the default category table.
pub fn bse_client(api: ScriptedBseApi) -> Arc<BseClient<ScriptedBseApi>> {
    Arc::new(BseClient::new(
        api,
        &BseConfig::default(),
        Arc::new(CategoryTable::default()),
        RetryPolicy::new(testkit::config::retry()),
    ))
}

pub fn analyzer_over<C: ExchangeClient + 'static>(client: Arc<C>) -> FirstFilingAnalyzer {
    FirstFilingAnalyzer::new(client, Arc::new(CategoryTable::default()))
}
