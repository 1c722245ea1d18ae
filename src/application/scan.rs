//! Scan orchestration: one reporting period, every requested category.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use super::analyzer::FirstFilingAnalyzer;
use crate::domain::{Announcement, EnrichedFiling, Period};
use crate::error::Result;

/// Lookback used when none is given.
pub const DEFAULT_LOOKBACK_YEARS: u32 = 15;

/// Parameters of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub reference_date: NaiveDate,
    pub period: Period,
    pub lookback_years: u32,
    /// Labels to scan; `None` scans every configured label.
    pub categories: Option<Vec<String>>,
}

impl ScanRequest {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            period: Period::Day,
            lookback_years: DEFAULT_LOOKBACK_YEARS,
            categories: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Success,
    /// At least one category could not be fetched.
    Partial,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFailure {
    pub label: String,
    pub error: String,
}

/// Outcome of a scan, as handed to report consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub status: ScanStatus,
    pub exchange: String,
    pub reference_date: NaiveDate,
    pub period: Period,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub lookback_years: u32,
    /// First filings per label. Every scanned label is present.
    pub filings: BTreeMap<String, Vec<EnrichedFiling>>,
    pub failed_checks: u32,
    pub errors: Vec<CategoryFailure>,
    pub generated_at: DateTime<Utc>,
}

impl ScanReport {
    #[must_use]
    pub fn filing_count(&self) -> usize {
        self.filings.values().map(Vec::len).sum()
    }
}

/// Runs [`FirstFilingAnalyzer`] over a reporting period.
pub struct FilingScanner {
    analyzer: FirstFilingAnalyzer,
}

impl FilingScanner {
    pub fn new(analyzer: FirstFilingAnalyzer) -> Self {
        Self { analyzer }
    }

    pub fn analyzer(&self) -> &FirstFilingAnalyzer {
        &self.analyzer
    }

    /// Fetch the period's announcements, keep the first filings and enrich
    /// them.
    ///
    /// Fails only when a requested label is not configured. Each scrip is
    /// checked once per label, on the date of its earliest announcement in
    /// the period.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanReport> {
        if let Some(labels) = &request.categories {
            for label in labels {
                self.analyzer.categories().rule(label)?;
            }
        }

        let (from, to) = request.period.range(request.reference_date);
        info!(
            exchange = self.analyzer.exchange_name(),
            %from,
            %to,
            period = %request.period,
            lookback_years = request.lookback_years,
            "Starting scan"
        );

        let period = self
            .analyzer
            .fetch_period(from, to, request.categories.as_deref())
            .await;

        let mut filings = BTreeMap::new();
        for (label, announcements) in &period.by_label {
            let mut firsts = Vec::new();

            for announcement in earliest_per_scrip(announcements) {
                let company = Some(announcement.company_name.as_str()).filter(|c| !c.is_empty());
                let date = announcement.date();

                if !self
                    .analyzer
                    .is_first_filing(&announcement.scrip_code, label, date, request.lookback_years, company)
                    .await
                {
                    continue;
                }
                info!(label = %label, scrip = %announcement.scrip_code, company = company.unwrap_or_default(), "First filing found");

                if let Some(filing) = self
                    .analyzer
                    .enrich_filing_data(&announcement.scrip_code, date, company)
                    .await
                {
                    firsts.push(filing);
                }
            }
            filings.insert(label.clone(), firsts);
        }

        let errors: Vec<CategoryFailure> = period
            .errors
            .into_iter()
            .map(|(label, error)| CategoryFailure { label, error })
            .collect();

        let report = ScanReport {
            status: if errors.is_empty() {
                ScanStatus::Success
            } else {
                ScanStatus::Partial
            },
            exchange: self.analyzer.exchange_name().to_string(),
            reference_date: request.reference_date,
            period: request.period,
            from_date: from,
            to_date: to,
            lookback_years: request.lookback_years,
            filings,
            failed_checks: self.analyzer.failed_checks(),
            errors,
            generated_at: Utc::now(),
        };
        info!(
            filings = report.filing_count(),
            failed_checks = report.failed_checks,
            errors = report.errors.len(),
            "Scan complete"
        );
        Ok(report)
    }
}

/// Earliest announcement of each scrip, in order of first appearance.
fn earliest_per_scrip(announcements: &[Announcement]) -> Vec<&Announcement> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut earliest: Vec<&Announcement> = Vec::new();

    for announcement in announcements {
        match slots.get(announcement.scrip_code.as_str()) {
            Some(&slot) => {
                if announcement.timestamp < earliest[slot].timestamp {
                    earliest[slot] = announcement;
                }
            }
            None => {
                slots.insert(&announcement.scrip_code, earliest.len());
                earliest.push(announcement);
            }
        }
    }
    earliest
}
