//! Keyword narrowing for catch-all subcategories and keyword-only providers.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::CategoryTable;

/// Text fields of a raw record that keyword matching looks at.
pub trait FilingText {
    /// Short subject or headline.
    fn subject(&self) -> &str;
    /// Extended description.
    fn detail(&self) -> &str;
}

/// Where a batch of records came from, which decides how it is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScope<'a> {
    /// Records from this provider subcategory. Only catch-all
    /// subcategories are keyword filtered.
    Subcategory(&'a str),
    /// Records from a provider with no subcategories; always keyword filtered.
    KeywordOnly,
}

/// Keyword filter driven by the category table.
#[derive(Debug, Clone)]
pub struct AnnouncementFilter {
    categories: Arc<CategoryTable>,
    catch_all: Vec<String>,
}

impl AnnouncementFilter {
    /// `catch_all` lists the provider subcategories too broad to trust
    /// without a keyword match.
    pub fn new(categories: Arc<CategoryTable>, catch_all: impl IntoIterator<Item = String>) -> Self {
        Self {
            categories,
            catch_all: catch_all.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_catch_all(&self, subcategory: &str) -> bool {
        self.catch_all.iter().any(|s| s == subcategory)
    }

    /// Keep the records that belong to `label`.
    ///
    /// A record passes when any keyword configured for the label appears,
    /// case-insensitively, in its subject or its detail. When the label has
    /// no keywords the batch passes through unchanged and a warning is logged.
    pub fn filter<R: FilingText>(&self, records: Vec<R>, label: &str, scope: MatchScope<'_>) -> Vec<R> {
        if let MatchScope::Subcategory(subcategory) = scope {
            if !self.is_catch_all(subcategory) {
                return records;
            }
        }

        let keywords: Vec<String> = self
            .categories
            .rule(label)
            .map(|rule| rule.keywords.iter().map(|k| k.to_lowercase()).collect())
            .unwrap_or_default();

        if keywords.is_empty() {
            warn!(label, ?scope, "No keywords configured, passing records through unfiltered");
            return records;
        }

        let before = records.len();
        let kept: Vec<R> = records
            .into_iter()
            .filter(|record| matches_any(record, &keywords))
            .collect();
        debug!(label, ?scope, before, after = kept.len(), "Keyword filter applied");
        kept
    }
}

/// True if any lowercase keyword occurs in the record's subject or detail.
fn matches_any<R: FilingText>(record: &R, keywords: &[String]) -> bool {
    let subject = record.subject().to_lowercase();
    let detail = record.detail().to_lowercase();
    keywords
        .iter()
        .any(|k| subject.contains(k.as_str()) || detail.contains(k.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CategoryRule;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        subject: &'static str,
        detail: &'static str,
    }

    impl FilingText for Record {
        fn subject(&self) -> &str {
            self.subject
        }
        fn detail(&self) -> &str {
            self.detail
        }
    }

    fn record(subject: &'static str, detail: &'static str) -> Record {
        Record { subject, detail }
    }

    fn filter() -> AnnouncementFilter {
        let table = CategoryTable::new(vec![
            CategoryRule::new("PPT", ["Investor Presentation", "General"], ["Presentation"]),
            CategoryRule::new("Analyst Call Intimation", ["Analyst / Investor Meet"], []),
            CategoryRule::new("Press Release", ["General"], ["press release", "Media Release"]),
        ]);
        AnnouncementFilter::new(Arc::new(table), ["General".to_string()])
    }

    #[test]
    fn catch_all_keeps_keyword_in_either_field() {
        let records = vec![
            record("Investor Presentation Q3", ""),
            record("Update", "Copy of presentation made to analysts"),
            record("Board meeting outcome", "Dividend declared"),
        ];

        let kept = filter().filter(records, "PPT", MatchScope::Subcategory("General"));

        assert_eq!(
            kept,
            vec![
                record("Investor Presentation Q3", ""),
                record("Update", "Copy of presentation made to analysts"),
            ]
        );
    }

    #[test]
    fn specific_subcategory_passes_through() {
        let records = vec![record("Board meeting outcome", "")];
        let kept = filter().filter(
            records.clone(),
            "PPT",
            MatchScope::Subcategory("Investor Presentation"),
        );
        assert_eq!(kept, records);
    }

    #[test]
    fn keyword_only_matches_any_keyword() {
        let records = vec![
            record("PRESS RELEASE", ""),
            record("Media release on expansion", ""),
            record("Trading window closure", ""),
        ];
        let kept = filter().filter(records, "Press Release", MatchScope::KeywordOnly);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn missing_keywords_pass_everything_through() {
        let records = vec![record("anything", ""), record("else", "")];
        let kept = filter().filter(records.clone(), "Analyst Call Intimation", MatchScope::KeywordOnly);
        assert_eq!(kept, records);
    }

    #[test]
    fn catch_all_detection() {
        let f = filter();
        assert!(f.is_catch_all("General"));
        assert!(!f.is_catch_all("general"));
        assert!(!f.is_catch_all("Investor Presentation"));
    }
}
