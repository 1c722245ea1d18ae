//! BSE API response shapes.

use serde::Deserialize;
use serde_json::Value;

use crate::adapter::outbound::parse::string_or_number;
use crate::application::filter::FilingText;

/// One page of the announcement feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementPage {
    #[serde(rename = "Table", default)]
    pub table: Vec<BseAnnouncement>,
    /// Row count summary; only meaningful on the first page.
    #[serde(rename = "Table1", default)]
    pub summary: Vec<RowCount>,
}

impl AnnouncementPage {
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.summary.first().and_then(|row| row.row_count)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowCount {
    #[serde(rename = "ROWCNT", default)]
    pub row_count: Option<u64>,
}

/// A raw BSE announcement record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BseAnnouncement {
    #[serde(rename = "SCRIP_CD", default, deserialize_with = "string_or_number")]
    pub scrip_code: Option<String>,
    #[serde(rename = "SLONGNAME", default)]
    pub company_name: Option<String>,
    /// Subject line.
    #[serde(rename = "NEWSSUB", default)]
    pub subject: Option<String>,
    /// Extended headline.
    #[serde(rename = "HEADLINE", default)]
    pub headline: Option<String>,
    /// Dissemination timestamp, ISO-like.
    #[serde(rename = "DT_TM", default)]
    pub timestamp: Option<String>,
    /// News date, e.g. "20 Feb 2025".
    #[serde(rename = "NEWS_DT", default)]
    pub news_date: Option<String>,
    #[serde(rename = "ATTACHMENTNAME", default)]
    pub attachment: Option<String>,
}

impl FilingText for BseAnnouncement {
    fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or_default()
    }

    fn detail(&self) -> &str {
        self.headline.as_deref().unwrap_or_default()
    }
}

/// Scrip header: trading symbol and company name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScripHeader {
    #[serde(rename = "SecurityId", alias = "ScripID", default)]
    pub symbol: Option<String>,
    #[serde(rename = "CompanyName", alias = "Cmpname", default)]
    pub company_name: Option<String>,
}

/// Quote header; only the current rate block is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteHeader {
    #[serde(rename = "CurrRate", default)]
    pub current_rate: Option<CurrentRate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentRate {
    /// Last traded price.
    #[serde(rename = "LTP", default)]
    pub last_traded_price: Option<Value>,
}

/// Trading statistics; market cap is in crore.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradingInfo {
    #[serde(rename = "MktCapFull", default)]
    pub market_cap_full: Option<String>,
}

/// Trailing twelve-month daily price series.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceHistory {
    #[serde(rename = "Data", default)]
    pub data: Option<PriceSeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceSeries {
    /// Rows of `[date, price, volume]`; date like "Thu Feb 20 2025 00:00:00".
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}
