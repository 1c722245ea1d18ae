//! BSE exchange client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::api::{BseApi, BseHttpApi};
use super::dto::{BseAnnouncement, PriceHistory};
use super::settings::BseConfig;
use crate::adapter::outbound::parse::{datetime_with, decimal_value, grouped_decimal, iso_datetime};
use crate::application::filter::{AnnouncementFilter, MatchScope};
use crate::application::pagination::PaginatedFetcher;
use crate::application::retry::RetryPolicy;
use crate::domain::{Announcement, CategoryTable, ScripInfo, CRORE};
use crate::error::Result;
use crate::port::{ExchangeClient, FeedQuery};

/// Date format of rows in the twelve-month price series.
const HISTORY_DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S";

/// BSE client: one paginated query per configured subcategory.
pub struct BseClient<A = BseHttpApi> {
    api: A,
    category: String,
    categories: Arc<CategoryTable>,
    filter: AnnouncementFilter,
    retry: RetryPolicy,
}

impl BseClient<BseHttpApi> {
    /// Client over the live HTTP API.
    pub fn from_config(config: &BseConfig, categories: Arc<CategoryTable>, retry: RetryPolicy) -> Self {
        Self::new(BseHttpApi::new(config), config, categories, retry)
    }
}

impl<A: BseApi> BseClient<A> {
    pub fn new(api: A, config: &BseConfig, categories: Arc<CategoryTable>, retry: RetryPolicy) -> Self {
        let filter = AnnouncementFilter::new(
            Arc::clone(&categories),
            config.catch_all_subcategories.iter().cloned(),
        );
        Self {
            api,
            category: config.category.clone(),
            categories,
            filter,
            retry,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch one provider subcategory for `label`, bypassing the label's
    /// configured subcategory list. Catch-all subcategories are still
    /// keyword filtered with the label's keywords.
    pub async fn fetch_subcategory(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        label: &str,
        subcategory: &str,
        scrip_code: Option<&str>,
    ) -> Result<Vec<Announcement>> {
        self.categories.rule(label)?;
        self.fetch_resolved(from, to, label, subcategory, scrip_code).await
    }

    async fn fetch_resolved(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        label: &str,
        subcategory: &str,
        scrip_code: Option<&str>,
    ) -> Result<Vec<Announcement>> {
        let query = FeedQuery {
            from,
            to,
            category: &self.category,
            subcategory,
            scrip_code,
        };
        let raw = PaginatedFetcher::new(&self.api, &self.retry)
            .fetch(&query)
            .await?;
        let records = self
            .filter
            .filter(raw, label, MatchScope::Subcategory(subcategory));

        Ok(records
            .into_iter()
            .filter_map(|record| normalize(record, label, to))
            .collect())
    }
}

#[async_trait]
impl<A: BseApi> ExchangeClient for BseClient<A> {
    async fn fetch_announcements(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        label: &str,
        scrip_code: Option<&str>,
    ) -> Result<Vec<Announcement>> {
        let rule = self.categories.rule(label)?;
        let mut announcements = Vec::new();

        for subcategory in &rule.subcategories {
            let batch = self
                .fetch_resolved(from, to, label, subcategory, scrip_code)
                .await?;
            debug!(label, subcategory = %subcategory, count = batch.len(), "Subcategory fetched");
            announcements.extend(batch);
        }

        info!(
            label,
            scrip = scrip_code.unwrap_or("*"),
            %from,
            %to,
            count = announcements.len(),
            "Fetched BSE announcements"
        );
        Ok(announcements)
    }

    async fn get_scrip_info(&self, scrip_code: &str, announcement_date: NaiveDate) -> ScripInfo {
        let mut info = ScripInfo::default();

        match self.api.scrip_header(scrip_code).await {
            Ok(header) => {
                info.symbol = header.symbol.filter(|s| !s.trim().is_empty());
                info.company_name = header.company_name.filter(|s| !s.trim().is_empty());
            }
            Err(err) => warn!(scrip = scrip_code, error = %err, "BSE scrip lookup failed"),
        }

        match self.api.quote(scrip_code).await {
            Ok(quote) => {
                info.current_price = quote
                    .current_rate
                    .and_then(|rate| rate.last_traded_price)
                    .as_ref()
                    .and_then(decimal_value);
            }
            Err(err) => warn!(scrip = scrip_code, error = %err, "BSE quote failed"),
        }

        match self.api.trading_info(scrip_code).await {
            // MktCapFull is reported in crore.
            Ok(trading) => {
                info.market_cap = trading
                    .market_cap_full
                    .as_deref()
                    .and_then(grouped_decimal)
                    .and_then(|crore| crore.checked_mul(CRORE));
            }
            Err(err) => warn!(scrip = scrip_code, error = %err, "BSE trading info failed"),
        }

        match self.api.price_history(scrip_code).await {
            Ok(history) => info.price_at_announcement = close_on(&history, announcement_date),
            Err(err) => warn!(scrip = scrip_code, error = %err, "BSE price history failed"),
        }

        info
    }

    fn exchange_name(&self) -> &'static str {
        "BSE"
    }
}

/// Convert a raw record, or skip it when it has no scrip code.
fn normalize(record: BseAnnouncement, label: &str, window_end: NaiveDate) -> Option<Announcement> {
    let Some(scrip_code) = record.scrip_code.clone() else {
        debug!(label, headline = ?record.headline, "Skipping record without scrip code");
        return None;
    };

    let timestamp = record_timestamp(&record).unwrap_or_else(|| {
        debug!(scrip = %scrip_code, raw = ?record.timestamp, "Unparsable timestamp, using window end");
        NaiveDateTime::new(window_end, NaiveTime::MIN)
    });

    let description = [&record.subject, &record.headline]
        .into_iter()
        .flatten()
        .find(|text| !text.is_empty())
        .cloned()
        .unwrap_or_default();

    Some(Announcement {
        scrip_code,
        company_name: record.company_name.unwrap_or_default(),
        timestamp,
        category: label.to_string(),
        description,
        attachment: record.attachment.filter(|a| !a.is_empty()),
    })
}

fn record_timestamp(record: &BseAnnouncement) -> Option<NaiveDateTime> {
    [&record.timestamp, &record.news_date]
        .into_iter()
        .flatten()
        .find_map(|raw| iso_datetime(raw))
}

/// Closing price on `date` from the twelve-month series.
fn close_on(history: &PriceHistory, date: NaiveDate) -> Option<Decimal> {
    history.data.as_ref()?.data.iter().find_map(|row| {
        let day = row
            .first()?
            .as_str()
            .and_then(|raw| datetime_with(raw, &[HISTORY_DATE_FORMAT]))?
            .date();
        if day == date {
            row.get(1).and_then(decimal_value)
        } else {
            None
        }
    })
}
