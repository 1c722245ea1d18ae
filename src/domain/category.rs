//! Category labels and their provider mappings.
//!
//! A [`CategoryTable`] is loaded once per run and shared read-only between
//! the exchange clients and the analyzer.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One configured category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Label reported to consumers, e.g. "PPT".
    pub label: String,
    /// Provider subcategories queried for this label, in order.
    #[serde(default)]
    pub subcategories: Vec<String>,
    /// Case-insensitive keywords isolating this label inside catch-all
    /// subcategories and keyword-only providers.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<S: Into<String>>(
        label: impl Into<String>,
        subcategories: impl IntoIterator<Item = S>,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            label: label.into(),
            subcategories: subcategories.into_iter().map(Into::into).collect(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered, closed set of category labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl CategoryTable {
    #[must_use]
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Look up a label, rejecting anything outside the table.
    pub fn rule(&self, label: &str) -> Result<&CategoryRule> {
        self.rules
            .iter()
            .find(|rule| rule.label == label)
            .ok_or_else(|| Error::UnknownCategory {
                label: label.to_string(),
            })
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.rules.iter().any(|rule| rule.label == label)
    }

    /// Labels in configured order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.label.as_str())
    }

    #[must_use]
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new(vec![
            CategoryRule::new(
                "Analyst Call Intimation",
                ["Analyst / Investor Meet"],
                ["Analyst", "Investor Meet"],
            ),
            CategoryRule::new(
                "Press Release",
                ["Press Release / Media Release"],
                ["Press Release", "Media Release"],
            ),
            CategoryRule::new(
                "PPT",
                ["Investor Presentation", "General"],
                ["Presentation"],
            ),
        ])
    }
}
