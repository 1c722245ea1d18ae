//! BSE JSON API transport.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};
use reqwest::Client as HttpClient;
use tracing::warn;
use url::Url;

use super::dto::{
    AnnouncementPage, BseAnnouncement, PriceHistory, QuoteHeader, ScripHeader, TradingInfo,
};
use super::settings::BseConfig;
use crate::adapter::outbound::http::get_json;
use crate::error::Result;
use crate::port::{FeedQuery, Page, PageSource};

/// Date format of the announcement feed's range parameters.
const QUERY_DATE_FORMAT: &str = "%Y%m%d";

/// Raw BSE endpoints. Announcement pages come through [`PageSource`]; the
/// remaining methods back enrichment.
#[async_trait]
pub trait BseApi: PageSource<Record = BseAnnouncement> {
    /// Trading symbol and company name.
    async fn scrip_header(&self, scrip_code: &str) -> Result<ScripHeader>;

    /// Current quote.
    async fn quote(&self, scrip_code: &str) -> Result<QuoteHeader>;

    /// Trading statistics including market cap.
    async fn trading_info(&self, scrip_code: &str) -> Result<TradingInfo>;

    /// Trailing twelve-month daily prices.
    async fn price_history(&self, scrip_code: &str) -> Result<PriceHistory>;
}

/// [`BseApi`] over HTTP.
pub struct BseHttpApi {
    http: HttpClient,
    base_url: String,
    segment_code: &'static str,
}

impl BseHttpApi {
    pub fn new(config: &BseConfig) -> Self {
        let mut headers = HeaderMap::new();
        match HeaderValue::from_str(&config.referer) {
            Ok(value) => {
                headers.insert(REFERER, value.clone());
                headers.insert(ORIGIN, value);
            }
            Err(err) => warn!(referer = %config.referer, error = %err, "Ignoring invalid referer"),
        }

        Self {
            http: config.http.build_client(headers, false),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            segment_code: config.segment_code(),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        Ok(Url::parse_with_params(
            &format!("{}/{path}", self.base_url),
            params,
        )?)
    }
}

#[async_trait]
impl PageSource for BseHttpApi {
    type Record = BseAnnouncement;

    async fn fetch_page(&self, query: &FeedQuery<'_>, page_no: u32) -> Result<Page<BseAnnouncement>> {
        let page_no = page_no.to_string();
        let from = query.from.format(QUERY_DATE_FORMAT).to_string();
        let to = query.to.format(QUERY_DATE_FORMAT).to_string();
        let url = self.endpoint(
            "AnnSubCategoryGetData/w",
            &[
                ("pageno", &page_no),
                ("strCat", query.category),
                ("subcategory", query.subcategory),
                ("strPrevDate", &from),
                ("strToDate", &to),
                ("strScrip", query.scrip_code.unwrap_or_default()),
                ("strSearch", "P"),
                ("strType", self.segment_code),
            ],
        )?;

        let page: AnnouncementPage = get_json(&self.http, url).await?;
        let total_count = page.total_count();
        Ok(Page::new(page.table, total_count))
    }
}

#[async_trait]
impl BseApi for BseHttpApi {
    async fn scrip_header(&self, scrip_code: &str) -> Result<ScripHeader> {
        let url = self.endpoint(
            "ComHeadernew/w",
            &[("quotetype", "EQ"), ("scripcode", scrip_code), ("seriesid", "")],
        )?;
        get_json(&self.http, url).await
    }

    async fn quote(&self, scrip_code: &str) -> Result<QuoteHeader> {
        let url = self.endpoint(
            "getScripHeaderData/w",
            &[("Debtflag", ""), ("scripcode", scrip_code), ("seriesid", "")],
        )?;
        get_json(&self.http, url).await
    }

    async fn trading_info(&self, scrip_code: &str) -> Result<TradingInfo> {
        let url = self.endpoint(
            "StockTrading/w",
            &[("flag", ""), ("quotetype", "EQ"), ("scripcode", scrip_code)],
        )?;
        get_json(&self.http, url).await
    }

    async fn price_history(&self, scrip_code: &str) -> Result<PriceHistory> {
        let url = self.endpoint(
            "StockReachGraph/w",
            &[
                ("flag", "12M"),
                ("fromdate", ""),
                ("todate", ""),
                ("scripcode", scrip_code),
                ("seriesid", ""),
            ],
        )?;
        get_json(&self.http, url).await
    }
}
