//! Scripted [`ExchangeClient`] for analyzer and scanner tests.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::domain::{Announcement, CategoryTable, ScripInfo};
use crate::error::{Error, Result};
use crate::port::ExchangeClient;

type FeedKey = (String, Option<String>);

/// One recorded `fetch_announcements` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub label: String,
    pub scrip_code: Option<String>,
}

/// Answers `fetch_announcements` from results scripted per
/// `(label, scrip filter)`; unscripted queries return nothing. Labels
/// outside the category table are rejected like a real client would.
pub struct ScriptedExchange {
    categories: CategoryTable,
    feeds: Mutex<HashMap<FeedKey, VecDeque<Result<Vec<Announcement>>>>>,
    scrip_info: HashMap<String, ScripInfo>,
    calls: Mutex<Vec<FetchCall>>,
    info_calls: Mutex<Vec<(String, NaiveDate)>>,
}

impl ScriptedExchange {
    pub fn new() -> Self {
        Self::with_categories(CategoryTable::default())
    }

    pub fn with_categories(categories: CategoryTable) -> Self {
        Self {
            categories,
            feeds: Mutex::new(HashMap::new()),
            scrip_info: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            info_calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a result for queries of `label` with scrip filter `scrip_code`.
    pub fn announcements(self, label: &str, scrip_code: Option<&str>, found: Vec<Announcement>) -> Self {
        self.push(label, scrip_code, Ok(found));
        self
    }

    pub fn fail(self, label: &str, scrip_code: Option<&str>, error: Error) -> Self {
        self.push(label, scrip_code, Err(error));
        self
    }

    pub fn scrip_info(mut self, scrip_code: &str, info: ScripInfo) -> Self {
        self.scrip_info.insert(scrip_code.to_string(), info);
        self
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().clone()
    }

    pub fn info_calls(&self) -> Vec<(String, NaiveDate)> {
        self.info_calls.lock().clone()
    }

    fn push(&self, label: &str, scrip_code: Option<&str>, result: Result<Vec<Announcement>>) {
        self.feeds
            .lock()
            .entry((label.to_string(), scrip_code.map(str::to_string)))
            .or_default()
            .push_back(result);
    }
}

impl Default for ScriptedExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeClient for ScriptedExchange {
    async fn fetch_announcements(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        label: &str,
        scrip_code: Option<&str>,
    ) -> Result<Vec<Announcement>> {
        self.categories.rule(label)?;
        self.calls.lock().push(FetchCall {
            from,
            to,
            label: label.to_string(),
            scrip_code: scrip_code.map(str::to_string),
        });

        let key = (label.to_string(), scrip_code.map(str::to_string));
        self.feeds
            .lock()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_scrip_info(&self, scrip_code: &str, announcement_date: NaiveDate) -> ScripInfo {
        self.info_calls
            .lock()
            .push((scrip_code.to_string(), announcement_date));
        self.scrip_info.get(scrip_code).cloned().unwrap_or_default()
    }

    fn exchange_name(&self) -> &'static str {
        "SCRIPTED"
    }
}
