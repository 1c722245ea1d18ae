//! Normalized announcement and enrichment types.
//!
//! - [`Announcement`] - One provider record in exchange-agnostic shape
//! - [`ScripInfo`] - Enrichment lookups for one instrument, every field optional
//! - [`EnrichedFiling`] - A first filing joined with its price data

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

/// Rupees per crore.
pub const CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// A corporate announcement normalized from any provider.
///
/// Produced fresh on every fetch and never mutated afterwards. Two
/// announcements describe the same filing when `scrip_code`, `category`
/// and `timestamp` match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    /// Exchange-assigned instrument code (BSE scrip code or NSE symbol).
    pub scrip_code: String,
    /// Company name as reported with the filing.
    pub company_name: String,
    /// When the filing was disseminated.
    pub timestamp: NaiveDateTime,
    /// Configured category label this filing was fetched under.
    pub category: String,
    /// Subject line, or the extended headline when the subject is empty.
    pub description: String,
    /// Provider attachment reference, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl Announcement {
    /// Calendar date of the filing.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Result of the enrichment lookups for one instrument.
///
/// Each lookup fails independently, so every field may be missing.
/// `market_cap` is in raw rupees; conversion to crore happens when a
/// filing is enriched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScripInfo {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub current_price: Option<Decimal>,
    pub price_at_announcement: Option<Decimal>,
    pub market_cap: Option<Decimal>,
}

impl ScripInfo {
    /// Market capitalization in whole crore, rounded half to even.
    #[must_use]
    pub fn market_cap_crore(&self) -> Option<i64> {
        self.market_cap.and_then(to_crore)
    }
}

/// Convert a raw rupee amount into whole crore.
#[must_use]
pub fn to_crore(raw: Decimal) -> Option<i64> {
    (raw / CRORE).round().to_i64()
}

/// A first filing joined with symbol, price and market-cap data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedFiling {
    pub scrip_code: String,
    pub symbol: String,
    pub company_name: Option<String>,
    pub date: NaiveDate,
    pub price_at_announcement: Option<Decimal>,
    pub current_price: Option<Decimal>,
    pub current_mkt_cap_cr: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn crore_conversion_rounds_to_nearest() {
        assert_eq!(to_crore(dec!(123_450_000)), Some(12));
        assert_eq!(to_crore(dec!(500_000_000)), Some(50));
        assert_eq!(to_crore(dec!(159_999_999)), Some(16));
        assert_eq!(to_crore(dec!(0)), Some(0));
    }

    #[test]
    fn crore_conversion_ties_go_to_even() {
        assert_eq!(to_crore(dec!(125_000_000)), Some(12));
        assert_eq!(to_crore(dec!(135_000_000)), Some(14));
    }

    #[test]
    fn missing_market_cap_has_no_crore_value() {
        assert_eq!(ScripInfo::default().market_cap_crore(), None);
    }

    #[test]
    fn announcement_date_drops_time() {
        let ann = Announcement {
            scrip_code: "500001".into(),
            company_name: "ABC Ltd".into(),
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 1)
                .and_then(|d| d.and_hms_opt(18, 30, 0))
                .unwrap(),
            category: "PPT".into(),
            description: "Investor Presentation".into(),
            attachment: None,
        };
        assert_eq!(ann.date(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    }
}
