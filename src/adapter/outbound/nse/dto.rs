//! NSE API response shapes.

use serde::Deserialize;
use serde_json::Value;

use crate::application::filter::FilingText;

/// A raw NSE corporate announcement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NseAnnouncement {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(rename = "sm_name", default)]
    pub company_name: Option<String>,
    /// Subject, e.g. "Investor Presentation".
    #[serde(rename = "desc", default)]
    pub subject: Option<String>,
    /// Extended text of the attachment.
    #[serde(rename = "attchmntText", default)]
    pub detail: Option<String>,
    /// Dissemination time, e.g. "20-Feb-2025 18:30:15".
    #[serde(rename = "an_dt", default)]
    pub announced_at: Option<String>,
    /// Sortable timestamp, e.g. "2025-02-20 18:30:15".
    #[serde(default)]
    pub sort_date: Option<String>,
    #[serde(rename = "attchmntFile", default)]
    pub attachment: Option<String>,
}

impl FilingText for NseAnnouncement {
    fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or_default()
    }

    fn detail(&self) -> &str {
        self.detail.as_deref().unwrap_or_default()
    }
}

/// Equity quote.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityQuote {
    #[serde(default)]
    pub info: QuoteInfo,
    #[serde(default)]
    pub price_info: PriceInfo,
    #[serde(default)]
    pub security_info: SecurityInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInfo {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(default)]
    pub last_price: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityInfo {
    /// Shares issued.
    #[serde(default)]
    pub issued_size: Option<Value>,
}

/// Historical equity prices.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoricalData {
    #[serde(default)]
    pub data: Vec<HistoricalRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoricalRow {
    #[serde(rename = "CH_CLOSING_PRICE", alias = "chClosingPrice", default)]
    pub closing_price: Option<Value>,
    #[serde(rename = "CH_TIMESTAMP", alias = "chTimestamp", default)]
    pub timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcement_decodes_nse_field_names() {
        let json = r#"{
            "symbol": "ABC",
            "sm_name": "ABC Industries Limited",
            "desc": "Investor Presentation",
            "attchmntText": "ABC has informed the Exchange about Investor Presentation",
            "an_dt": "01-Jan-2023 18:30:00",
            "sort_date": "2023-01-01 18:30:00",
            "attchmntFile": "https://nsearchives.nseindia.com/corporate/ABC.pdf"
        }"#;

        let record: NseAnnouncement = serde_json::from_str(json).unwrap();

        assert_eq!(record.symbol.as_deref(), Some("ABC"));
        assert_eq!(record.subject(), "Investor Presentation");
        assert!(record.detail().contains("informed the Exchange"));
    }

    #[test]
    fn quote_decodes_nested_blocks() {
        let json = r#"{
            "info": {"symbol": "ABC", "companyName": "ABC Industries Limited"},
            "priceInfo": {"lastPrice": 250.5},
            "securityInfo": {"issuedSize": 2000000}
        }"#;

        let quote: EquityQuote = serde_json::from_str(json).unwrap();

        assert_eq!(quote.info.company_name.as_deref(), Some("ABC Industries Limited"));
        assert_eq!(quote.price_info.last_price, Some(serde_json::json!(250.5)));
        assert_eq!(quote.security_info.issued_size, Some(serde_json::json!(2000000)));
    }

    #[test]
    fn historical_row_accepts_both_casings() {
        let upper: HistoricalRow =
            serde_json::from_str(r#"{"CH_CLOSING_PRICE": 101.5}"#).unwrap();
        let camel: HistoricalRow = serde_json::from_str(r#"{"chClosingPrice": 101.5}"#).unwrap();
        assert_eq!(upper.closing_price, camel.closing_price);
    }
}
