//! Lenient field parsing for provider payloads.
//!
//! Providers report numbers as JSON numbers or as Indian-grouped strings
//! ("19,21,678.78"), and timestamps in several formats. Every helper here
//! returns `None` instead of failing so one bad field never sinks a record.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a decimal that may contain digit-group commas or surrounding spaces.
#[must_use]
pub fn grouped_decimal(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Decimal from a JSON number or numeric string.
#[must_use]
pub fn decimal_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => grouped_decimal(&n.to_string()),
        Value::String(s) => grouped_decimal(s),
        _ => None,
    }
}

/// Try each `strftime` pattern in turn.
#[must_use]
pub fn datetime_with(raw: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// ISO-8601 style timestamps with optional fractional seconds, `T` or space
/// separated, or a bare date (midnight).
#[must_use]
pub fn iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    datetime_with(raw, &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"])
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Deserialize a field that may arrive as a string or a number into
/// `Option<String>`. Null and empty strings become `None`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn grouped_decimals_parse() {
        assert_eq!(grouped_decimal("19,21,678.78"), Some(dec!(1921678.78)));
        assert_eq!(grouped_decimal(" 2,345.60 "), Some(dec!(2345.60)));
        assert_eq!(grouped_decimal("42"), Some(dec!(42)));
        assert_eq!(grouped_decimal("-"), None);
        assert_eq!(grouped_decimal(""), None);
        assert_eq!(grouped_decimal("n/a"), None);
    }

    #[test]
    fn decimal_from_json_values() {
        assert_eq!(decimal_value(&serde_json::json!(101.5)), Some(dec!(101.5)));
        assert_eq!(decimal_value(&serde_json::json!("1,000")), Some(dec!(1000)));
        assert_eq!(decimal_value(&serde_json::json!(null)), None);
    }

    #[test]
    fn iso_timestamps_with_and_without_fraction() {
        let expected = NaiveDate::from_ymd_opt(2025, 2, 20)
            .and_then(|d| d.and_hms_opt(18, 30, 15))
            .unwrap();
        assert_eq!(iso_datetime("2025-02-20T18:30:15"), Some(expected));
        assert_eq!(
            iso_datetime("2025-02-20T18:30:15.443").map(|t| t.and_utc().timestamp()),
            Some(expected.and_utc().timestamp())
        );
        assert_eq!(iso_datetime("2025-02-20 18:30:15"), Some(expected));
        assert_eq!(
            iso_datetime("2025-02-20"),
            NaiveDate::from_ymd_opt(2025, 2, 20).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(iso_datetime("20 Feb 2025"), None);
    }

    #[test]
    fn custom_formats_tried_in_order() {
        let parsed = datetime_with("20-Feb-2025 18:30:15", &["%Y-%m-%d", "%d-%b-%Y %H:%M:%S"]);
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2025, 2, 20).and_then(|d| d.and_hms_opt(18, 30, 15))
        );
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "string_or_number")]
        code: Option<String>,
    }

    #[test]
    fn string_or_number_accepts_both() {
        let row: Row = serde_json::from_str(r#"{"code": 500001}"#).unwrap();
        assert_eq!(row.code.as_deref(), Some("500001"));
        let row: Row = serde_json::from_str(r#"{"code": " 500001 "}"#).unwrap();
        assert_eq!(row.code.as_deref(), Some("500001"));
        let row: Row = serde_json::from_str(r#"{"code": null}"#).unwrap();
        assert_eq!(row.code, None);
        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.code, None);
    }
}
