//! Scripted [`PageSource`] for pagination tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::{FeedQuery, Page, PageSource};

/// Pops one scripted result per `fetch_page` call and records the page
/// numbers requested. An exhausted script yields empty pages.
pub struct ScriptedSource<R> {
    script: Mutex<VecDeque<Result<Page<R>>>>,
    requested: Mutex<Vec<u32>>,
}

impl<R> ScriptedSource<R> {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Queue a page of `records` carrying an optional total-count hint.
    pub fn page(self, records: Vec<R>, total_count: Option<u64>) -> Self {
        self.script
            .lock()
            .push_back(Ok(Page::new(records, total_count)));
        self
    }

    /// Queue a failure.
    pub fn fail(self, error: Error) -> Self {
        self.script.lock().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requested.lock().len()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested.lock().clone()
    }
}

impl<R> Default for ScriptedSource<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Send> PageSource for ScriptedSource<R> {
    type Record = R;

    async fn fetch_page(&self, _query: &FeedQuery<'_>, page_no: u32) -> Result<Page<R>> {
        self.requested.lock().push(page_no);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Page::new(Vec::new(), None)))
    }
}
