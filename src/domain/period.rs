//! Reporting periods and lookback windows.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days counted per lookback year. Leap days are not compensated.
pub const DAYS_PER_YEAR: u64 = 365;

/// Span of announcements a scan covers, ending on the reference date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// The reference date only.
    #[default]
    Day,
    /// Monday of the reference week through the reference date.
    Wtd,
    /// First of the month through the reference date.
    Mtd,
    /// First day of the quarter through the reference date.
    Qtd,
}

impl Period {
    /// Inclusive `(from, to)` range for this period ending at `reference`.
    #[must_use]
    pub fn range(self, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
        let from = match self {
            Self::Day => reference,
            Self::Wtd => {
                let offset = u64::from(reference.weekday().num_days_from_monday());
                reference - Days::new(offset)
            }
            Self::Mtd => reference.with_day(1).unwrap_or(reference),
            Self::Qtd => {
                let month = ((reference.month() - 1) / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(reference.year(), month, 1).unwrap_or(reference)
            }
        };
        (from, reference)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Wtd => write!(f, "wtd"),
            Self::Mtd => write!(f, "mtd"),
            Self::Qtd => write!(f, "qtd"),
        }
    }
}

/// Backward-looking search range ending at a filing date, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookbackWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LookbackWindow {
    /// Window of `years` fixed 365-day years ending at `filing_date`.
    #[must_use]
    pub fn ending_at(filing_date: NaiveDate, years: u32) -> Self {
        let days = u64::from(years) * DAYS_PER_YEAR;
        let start = filing_date
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start,
            end: filing_date,
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_period_is_single_date() {
        let d = date(2024, 5, 15);
        assert_eq!(Period::Day.range(d), (d, d));
    }

    #[test]
    fn wtd_starts_on_monday() {
        // 2024-05-16 is a Thursday
        assert_eq!(
            Period::Wtd.range(date(2024, 5, 16)),
            (date(2024, 5, 13), date(2024, 5, 16))
        );
        // Monday maps to itself
        assert_eq!(
            Period::Wtd.range(date(2024, 5, 13)),
            (date(2024, 5, 13), date(2024, 5, 13))
        );
    }

    #[test]
    fn mtd_and_qtd_start_dates() {
        let d = date(2024, 8, 20);
        assert_eq!(Period::Mtd.range(d).0, date(2024, 8, 1));
        assert_eq!(Period::Qtd.range(d).0, date(2024, 7, 1));
        assert_eq!(Period::Qtd.range(date(2024, 3, 31)).0, date(2024, 1, 1));
        assert_eq!(Period::Qtd.range(date(2024, 12, 1)).0, date(2024, 10, 1));
    }

    #[test]
    fn lookback_uses_fixed_365_day_years() {
        let window = LookbackWindow::ending_at(date(2024, 3, 1), 1);
        // 2024 is a leap year, so 365 days back lands on 2023-03-02
        assert_eq!(window.start, date(2023, 3, 2));
        assert_eq!(window.end, date(2024, 3, 1));

        let window = LookbackWindow::ending_at(date(2023, 1, 1), 2);
        assert_eq!(window.start, date(2021, 1, 1));
    }

    #[test]
    fn lookback_window_is_inclusive() {
        let window = LookbackWindow::ending_at(date(2023, 1, 1), 2);
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(date(2023, 1, 2)));
        assert!(!window.contains(date(2020, 12, 31)));
    }

    #[test]
    fn zero_years_is_the_filing_date_only() {
        let d = date(2023, 6, 30);
        assert_eq!(LookbackWindow::ending_at(d, 0), LookbackWindow { start: d, end: d });
    }
}
