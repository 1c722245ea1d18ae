//! Builders for domain primitives used in tests.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::Announcement;

/// Build a date, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// An announcement stamped at midnight of `on`.
pub fn announcement(scrip_code: &str, label: &str, on: NaiveDate) -> Announcement {
    Announcement {
        scrip_code: scrip_code.to_string(),
        company_name: format!("Company {scrip_code}"),
        timestamp: on.and_time(NaiveTime::MIN),
        category: label.to_string(),
        description: label.to_string(),
        attachment: None,
    }
}
