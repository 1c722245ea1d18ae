//! Exchange port for announcement feeds and instrument enrichment.
//!
//! Every provider variant normalizes its own field names and date formats
//! behind these traits, so callers never see provider-specific shapes.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Announcement, ScripInfo};
use crate::error::Result;

/// One query against a provider announcement feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedQuery<'a> {
    /// First day of the range, inclusive.
    pub from: NaiveDate,
    /// Last day of the range, inclusive.
    pub to: NaiveDate,
    /// Provider top-level category.
    pub category: &'a str,
    /// Provider subcategory. Empty for providers without subcategories.
    pub subcategory: &'a str,
    /// Restrict to one instrument.
    pub scrip_code: Option<&'a str>,
}

/// One page of raw provider records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    pub records: Vec<R>,
    /// Total row count across all pages. Providers attach it to the first
    /// page; `None` means the provider did not report one.
    pub total_count: Option<u64>,
}

impl<R> Page<R> {
    pub fn new(records: Vec<R>, total_count: Option<u64>) -> Self {
        Self {
            records,
            total_count,
        }
    }
}

/// Source of raw announcement pages for a single provider.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Raw record type as returned by the provider.
    type Record: Send;

    /// Fetch page `page_no` (1-based) of `query`.
    async fn fetch_page(&self, query: &FeedQuery<'_>, page_no: u32) -> Result<Page<Self::Record>>;
}

/// Exchange client: announcement retrieval plus enrichment lookups.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Fetch announcements for a configured category label.
    ///
    /// The label is resolved to provider subcategories or keywords through
    /// the category table; unknown labels fail with
    /// [`Error::UnknownCategory`](crate::error::Error::UnknownCategory)
    /// before any network call. Results are concatenated across
    /// subcategories in configured order.
    async fn fetch_announcements(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        label: &str,
        scrip_code: Option<&str>,
    ) -> Result<Vec<Announcement>>;

    /// Resolve symbol, quote, market cap and the close on `announcement_date`.
    ///
    /// Each lookup degrades to `None` on its own; this never fails as a whole.
    async fn get_scrip_info(&self, scrip_code: &str, announcement_date: NaiveDate) -> ScripInfo;

    /// Get the exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;
}
