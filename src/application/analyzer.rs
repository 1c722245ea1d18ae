//! First-filing determination.
//!
//! [`FirstFilingAnalyzer`] fetches a period's announcements per category,
//! decides whether each filing is the first of its category for the
//! instrument within a lookback window, and enriches the ones that are.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::domain::{Announcement, CategoryTable, EnrichedFiling, LookbackWindow};
use crate::port::ExchangeClient;

/// Announcements for a period, with the labels whose fetch failed.
#[derive(Debug, Default)]
pub struct PeriodAnnouncements {
    /// Every requested label; failed labels map to an empty list.
    pub by_label: BTreeMap<String, Vec<Announcement>>,
    /// `(label, error message)` per failed label.
    pub errors: Vec<(String, String)>,
}

pub struct FirstFilingAnalyzer {
    client: Arc<dyn ExchangeClient>,
    categories: Arc<CategoryTable>,
    failed_checks: AtomicU32,
}

impl FirstFilingAnalyzer {
    pub fn new(client: Arc<dyn ExchangeClient>, categories: Arc<CategoryTable>) -> Self {
        Self {
            client,
            categories,
            failed_checks: AtomicU32::new(0),
        }
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    #[must_use]
    pub fn exchange_name(&self) -> &'static str {
        self.client.exchange_name()
    }

    /// History fetches that failed so far. Never reset.
    #[must_use]
    pub fn failed_checks(&self) -> u32 {
        self.failed_checks.load(Ordering::Relaxed)
    }

    /// Announcements per label for `[from, to]`.
    ///
    /// `categories` selects a subset of labels; `None` means every
    /// configured label. A failing label yields an empty list.
    pub async fn fetch_announcements_for_period(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        categories: Option<&[String]>,
    ) -> BTreeMap<String, Vec<Announcement>> {
        self.fetch_period(from, to, categories).await.by_label
    }

    /// Like [`fetch_announcements_for_period`](Self::fetch_announcements_for_period),
    /// also reporting which labels failed.
    pub async fn fetch_period(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        categories: Option<&[String]>,
    ) -> PeriodAnnouncements {
        let labels: Vec<String> = match categories {
            Some(subset) => subset.to_vec(),
            None => self.categories.labels().map(str::to_string).collect(),
        };

        let mut result = PeriodAnnouncements::default();
        for label in labels {
            info!(exchange = self.client.exchange_name(), label = %label, %from, %to, "Fetching announcements");
            let found = match self.client.fetch_announcements(from, to, &label, None).await {
                Ok(found) => found,
                Err(err) => {
                    error!(label = %label, error = %err, "Category fetch failed");
                    result.errors.push((label.clone(), err.to_string()));
                    Vec::new()
                }
            };
            result.by_label.insert(label, found);
        }
        result
    }

    /// Whether the filing on `filing_date` is the only one of `label` for
    /// `scrip_code` within `lookback_years`.
    ///
    /// Exactly one match means the filing found only itself. Zero or several
    /// matches mean "not first". A failed history fetch also answers `false`
    /// and bumps [`failed_checks`](Self::failed_checks).
    pub async fn is_first_filing(
        &self,
        scrip_code: &str,
        label: &str,
        filing_date: NaiveDate,
        lookback_years: u32,
        company_name: Option<&str>,
    ) -> bool {
        let window = LookbackWindow::ending_at(filing_date, lookback_years);
        let history = self
            .client
            .fetch_announcements(window.start, window.end, label, Some(scrip_code))
            .await;

        match history {
            Ok(found) => {
                debug!(
                    scrip = scrip_code,
                    company = company_name.unwrap_or_default(),
                    label,
                    start = %window.start,
                    end = %window.end,
                    matches = found.len(),
                    "Lookback complete"
                );
                found.len() == 1
            }
            Err(err) => {
                let failed = self.failed_checks.fetch_add(1, Ordering::Relaxed) + 1;
                error!(
                    scrip = scrip_code,
                    company = company_name.unwrap_or_default(),
                    label,
                    error = %err,
                    failed_checks = failed,
                    "History fetch failed, treating as not first"
                );
                false
            }
        }
    }

    /// Join a first filing with its symbol, prices and market cap.
    ///
    /// Returns `None` when no trading symbol resolves. The provider's company
    /// name wins over `company_name`.
    pub async fn enrich_filing_data(
        &self,
        scrip_code: &str,
        announcement_date: NaiveDate,
        company_name: Option<&str>,
    ) -> Option<EnrichedFiling> {
        let info = self.client.get_scrip_info(scrip_code, announcement_date).await;
        let current_mkt_cap_cr = info.market_cap_crore();

        let Some(symbol) = info.symbol else {
            warn!(scrip = scrip_code, "No trading symbol resolved, dropping filing");
            return None;
        };

        Some(EnrichedFiling {
            scrip_code: scrip_code.to_string(),
            symbol,
            company_name: info
                .company_name
                .or_else(|| company_name.map(str::to_string)),
            date: announcement_date,
            price_at_announcement: info.price_at_announcement,
            current_price: info.current_price,
            current_mkt_cap_cr,
        })
    }
}
