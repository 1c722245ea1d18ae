//! NSE exchange client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{debug, info, warn};

use super::api::{NseApi, NseHttpApi};
use super::dto::NseAnnouncement;
use super::settings::NseConfig;
use crate::adapter::outbound::parse::{datetime_with, decimal_value};
use crate::application::filter::{AnnouncementFilter, MatchScope};
use crate::application::pagination::PaginatedFetcher;
use crate::application::retry::RetryPolicy;
use crate::domain::{Announcement, CategoryTable, ScripInfo};
use crate::error::Result;
use crate::port::{ExchangeClient, FeedQuery};

const ANNOUNCED_AT_FORMAT: &str = "%d-%b-%Y %H:%M:%S";
const SORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// NSE client: one query per label, narrowed by keywords.
pub struct NseClient<A = NseHttpApi> {
    api: A,
    index: String,
    categories: Arc<CategoryTable>,
    filter: AnnouncementFilter,
    retry: RetryPolicy,
}

impl NseClient<NseHttpApi> {
    pub fn from_config(config: &NseConfig, categories: Arc<CategoryTable>, retry: RetryPolicy) -> Self {
        Self::new(NseHttpApi::new(config), config, categories, retry)
    }
}

impl<A: NseApi> NseClient<A> {
    pub fn new(api: A, config: &NseConfig, categories: Arc<CategoryTable>, retry: RetryPolicy) -> Self {
        let filter = AnnouncementFilter::new(Arc::clone(&categories), Vec::new());
        Self {
            api,
            index: config.index.clone(),
            categories,
            filter,
            retry,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

#[async_trait]
impl<A: NseApi> ExchangeClient for NseClient<A> {
    async fn fetch_announcements(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        label: &str,
        scrip_code: Option<&str>,
    ) -> Result<Vec<Announcement>> {
        self.categories.rule(label)?;

        let query = FeedQuery {
            from,
            to,
            category: &self.index,
            subcategory: "",
            scrip_code,
        };
        let raw = PaginatedFetcher::new(&self.api, &self.retry)
            .fetch(&query)
            .await?;
        let records = self.filter.filter(raw, label, MatchScope::KeywordOnly);

        let announcements: Vec<Announcement> = records
            .into_iter()
            .filter_map(|record| normalize(record, label, to))
            .collect();

        info!(
            label,
            scrip = scrip_code.unwrap_or("*"),
            %from,
            %to,
            count = announcements.len(),
            "Fetched NSE announcements"
        );
        Ok(announcements)
    }

    async fn get_scrip_info(&self, scrip_code: &str, announcement_date: NaiveDate) -> ScripInfo {
        let mut info = ScripInfo {
            symbol: Some(scrip_code.to_string()),
            ..ScripInfo::default()
        };

        match self.api.quote(scrip_code).await {
            Ok(quote) => {
                info.company_name = quote.info.company_name.filter(|s| !s.trim().is_empty());
                info.current_price = quote.price_info.last_price.as_ref().and_then(decimal_value);
                let issued = quote.security_info.issued_size.as_ref().and_then(decimal_value);
                info.market_cap = info
                    .current_price
                    .zip(issued)
                    .and_then(|(price, shares)| price.checked_mul(shares));
            }
            Err(err) => warn!(symbol = scrip_code, error = %err, "NSE quote failed"),
        }

        match self.api.historical(scrip_code, announcement_date).await {
            Ok(rows) => {
                info.price_at_announcement = rows
                    .first()
                    .and_then(|row| row.closing_price.as_ref())
                    .and_then(decimal_value);
            }
            Err(err) => warn!(symbol = scrip_code, error = %err, "NSE historical prices failed"),
        }

        info
    }

    fn exchange_name(&self) -> &'static str {
        "NSE"
    }
}

fn normalize(record: NseAnnouncement, label: &str, window_end: NaiveDate) -> Option<Announcement> {
    let Some(symbol) = record.symbol.clone().filter(|s| !s.trim().is_empty()) else {
        debug!(label, subject = ?record.subject, "Skipping record without symbol");
        return None;
    };

    let timestamp = record
        .announced_at
        .as_deref()
        .and_then(|raw| datetime_with(raw, &[ANNOUNCED_AT_FORMAT]))
        .or_else(|| {
            record
                .sort_date
                .as_deref()
                .and_then(|raw| datetime_with(raw, &[SORT_DATE_FORMAT]))
        })
        .unwrap_or_else(|| {
            debug!(symbol = %symbol, raw = ?record.announced_at, "Unparsable timestamp, using window end");
            NaiveDateTime::new(window_end, NaiveTime::MIN)
        });

    Some(Announcement {
        scrip_code: symbol,
        company_name: record.company_name.unwrap_or_default(),
        timestamp,
        category: label.to_string(),
        description: record.subject.unwrap_or_default(),
        attachment: record.attachment.filter(|a| !a.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::config as test_config;
    use crate::testkit::domain::date;
    use crate::testkit::provider::{nse_record, ScriptedNseApi};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn client(api: ScriptedNseApi) -> NseClient<ScriptedNseApi> {
        NseClient::new(
            api,
            &NseConfig::default(),
            Arc::new(CategoryTable::default()),
            RetryPolicy::new(test_config::retry()),
        )
    }

    #[tokio::test]
    async fn keyword_filter_and_timestamp_formats() {
        let mut sorted_only = nse_record("DEF", "Press Release", "");
        sorted_only.announced_at = Some("garbage".into());
        sorted_only.sort_date = Some("2023-01-01 09:15:00".into());
        let api = ScriptedNseApi::new().page(vec![
            nse_record("ABC", "Investor Presentation", "01-Jan-2023 18:30:00"),
            sorted_only,
            nse_record("GHI", "Updates", "01-Jan-2023 19:00:00"),
        ]);
        let client = client(api);

        let found = client
            .fetch_announcements(date(2023, 1, 1), date(2023, 1, 1), "Press Release", None)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].scrip_code, "DEF");
        assert_eq!(found[0].timestamp, date(2023, 1, 1).and_hms_opt(9, 15, 0).unwrap());
        assert_eq!(client.api().call_count(), 1);
    }

    #[tokio::test]
    async fn detail_text_also_matches_keywords() {
        let mut record = nse_record("ABC", "Updates", "01-Jan-2023 18:30:00");
        record.detail = Some("Copy of the investor presentation".into());
        let client = client(ScriptedNseApi::new().page(vec![record]));

        let found = client
            .fetch_announcements(date(2023, 1, 1), date(2023, 1, 1), "PPT", None)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Updates");
    }

    #[tokio::test]
    async fn missing_timestamps_fall_back_to_window_end() {
        let mut record = nse_record("ABC", "Investor Presentation", "");
        record.announced_at = None;
        let client = client(ScriptedNseApi::new().page(vec![record]));

        let found = client
            .fetch_announcements(date(2022, 1, 1), date(2023, 1, 1), "PPT", Some("ABC"))
            .await
            .unwrap();

        assert_eq!(found[0].timestamp, date(2023, 1, 1).and_time(NaiveTime::MIN));
        assert_eq!(client.api().scrip_filters(), vec![Some("ABC".to_string())]);
    }

    #[tokio::test]
    async fn unknown_label_rejected() {
        let client = client(ScriptedNseApi::new());

        let result = client
            .fetch_announcements(date(2023, 1, 1), date(2023, 1, 1), "Buyback", None)
            .await;

        assert!(matches!(result, Err(Error::UnknownCategory { .. })));
        assert_eq!(client.api().call_count(), 0);
    }

    #[tokio::test]
    async fn scrip_info_uses_symbol_and_issued_size() {
        let api = ScriptedNseApi::new()
            .quote("ABC Industries Limited", json!(250), json!(2_000_000))
            .history(json!("101.50"));
        let client = client(api);

        let info = client.get_scrip_info("ABC", date(2023, 1, 1)).await;

        assert_eq!(info.symbol.as_deref(), Some("ABC"));
        assert_eq!(info.company_name.as_deref(), Some("ABC Industries Limited"));
        assert_eq!(info.current_price, Some(dec!(250)));
        assert_eq!(info.price_at_announcement, Some(dec!(101.50)));
        assert_eq!(info.market_cap_crore(), Some(50));
    }

    #[tokio::test]
    async fn failed_quote_keeps_symbol() {
        let client = client(ScriptedNseApi::new());

        let info = client.get_scrip_info("ABC", date(2023, 1, 1)).await;

        assert_eq!(info.symbol.as_deref(), Some("ABC"));
        assert_eq!(info.market_cap, None);
        assert_eq!(info.price_at_announcement, None);
    }
}
