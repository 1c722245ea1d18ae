//! NSE JSON API transport.
//!
//! The API rejects requests without the cookies the site hands out on its
//! home page, so the client keeps a cookie jar and visits the home page once
//! before the first API call.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use reqwest::Client as HttpClient;
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use url::Url;

use super::dto::{EquityQuote, HistoricalData, HistoricalRow, NseAnnouncement};
use super::settings::NseConfig;
use crate::adapter::outbound::http::{get_json, transport_error};
use crate::error::Result;
use crate::port::{FeedQuery, Page, PageSource};

/// Date format of the API's range parameters.
const QUERY_DATE_FORMAT: &str = "%d-%m-%Y";

/// Raw NSE endpoints. The announcement feed is a single unpaginated page.
#[async_trait]
pub trait NseApi: PageSource<Record = NseAnnouncement> {
    async fn quote(&self, symbol: &str) -> Result<EquityQuote>;

    /// Daily rows for `symbol` on `date`.
    async fn historical(&self, symbol: &str, date: NaiveDate) -> Result<Vec<HistoricalRow>>;
}

/// [`NseApi`] over HTTP.
pub struct NseHttpApi {
    http: HttpClient,
    base_url: String,
    index: String,
    session: OnceCell<()>,
}

impl NseHttpApi {
    pub fn new(config: &NseConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        match HeaderValue::from_str(&format!("{base_url}/")) {
            Ok(value) => {
                headers.insert(REFERER, value);
            }
            Err(err) => warn!(base_url = %base_url, error = %err, "Ignoring invalid referer"),
        }

        Self {
            http: config.http.build_client(headers, true),
            base_url,
            index: config.index.clone(),
            session: OnceCell::new(),
        }
    }

    /// Visit the home page once to pick up session cookies. A failed visit
    /// is logged and not repeated; the API call that follows reports the
    /// real error.
    async fn ensure_session(&self) {
        self.session
            .get_or_init(|| async {
                let result = self
                    .http
                    .get(format!("{}/", self.base_url))
                    .send()
                    .await
                    .map_err(transport_error);
                match result {
                    Ok(response) => debug!(status = %response.status(), "NSE session initialised"),
                    Err(err) => warn!(error = %err, "NSE session warm-up failed"),
                }
            })
            .await;
    }

    async fn api_get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        self.ensure_session().await;
        let url = Url::parse_with_params(&format!("{}/api/{path}", self.base_url), params)?;
        get_json(&self.http, url).await
    }
}

#[async_trait]
impl PageSource for NseHttpApi {
    type Record = NseAnnouncement;

    async fn fetch_page(&self, query: &FeedQuery<'_>, _page_no: u32) -> Result<Page<NseAnnouncement>> {
        let from = query.from.format(QUERY_DATE_FORMAT).to_string();
        let to = query.to.format(QUERY_DATE_FORMAT).to_string();
        let mut params = vec![
            ("index", self.index.as_str()),
            ("from_date", from.as_str()),
            ("to_date", to.as_str()),
        ];
        if let Some(symbol) = query.scrip_code {
            params.push(("symbol", symbol));
        }

        let records: Vec<NseAnnouncement> = self.api_get("corporate-announcements", &params).await?;
        Ok(Page::new(records, None))
    }
}

#[async_trait]
impl NseApi for NseHttpApi {
    async fn quote(&self, symbol: &str) -> Result<EquityQuote> {
        self.api_get("quote-equity", &[("symbol", symbol)]).await
    }

    async fn historical(&self, symbol: &str, date: NaiveDate) -> Result<Vec<HistoricalRow>> {
        let day = date.format(QUERY_DATE_FORMAT).to_string();
        let data: HistoricalData = self
            .api_get(
                "historical/cm/equity",
                &[
                    ("symbol", symbol),
                    ("series", "[\"EQ\"]"),
                    ("from", day.as_str()),
                    ("to", day.as_str()),
                ],
            )
            .await?;
        Ok(data.data)
    }
}
