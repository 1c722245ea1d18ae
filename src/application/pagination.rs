//! Multi-page retrieval of one provider query.

use tracing::{debug, error};

use super::retry::RetryPolicy;
use crate::error::Result;
use crate::port::{FeedQuery, PageSource};

/// Drives page-by-page retrieval of a [`PageSource`] query.
///
/// The whole pagination run is one retryable unit: a failure on any page
/// restarts from page 1.
pub struct PaginatedFetcher<'a, S: PageSource + ?Sized> {
    source: &'a S,
    retry: &'a RetryPolicy,
}

impl<'a, S: PageSource + ?Sized> PaginatedFetcher<'a, S> {
    pub fn new(source: &'a S, retry: &'a RetryPolicy) -> Self {
        Self { source, retry }
    }

    /// Fetch every record matching `query`, in provider order.
    pub async fn fetch(&self, query: &FeedQuery<'_>) -> Result<Vec<S::Record>> {
        self.retry
            .execute("paginated fetch", || self.fetch_all_pages(query))
            .await
    }

    /// Stop once the accumulated count reaches the total from page 1, or on
    /// an empty page. Without a total (or a zero total) only page 1 is read.
    async fn fetch_all_pages(&self, query: &FeedQuery<'_>) -> Result<Vec<S::Record>> {
        let mut records = Vec::new();
        let mut total_count: Option<u64> = None;
        let mut page_no = 1;

        loop {
            debug!(
                page = page_no,
                subcategory = query.subcategory,
                from = %query.from,
                to = %query.to,
                "Fetching page"
            );

            let page = self
                .source
                .fetch_page(query, page_no)
                .await
                .map_err(|err| {
                    error!(page = page_no, subcategory = query.subcategory, error = %err, "Page fetch failed");
                    err
                })?;

            let total = *total_count.get_or_insert(page.total_count.unwrap_or(0));
            let page_was_empty = page.records.is_empty();
            records.extend(page.records);

            if records.len() as u64 >= total || page_was_empty {
                break;
            }
            page_no += 1;
        }

        debug!(count = records.len(), subcategory = query.subcategory, "Pagination complete");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::testkit::config as test_config;
    use crate::testkit::source::ScriptedSource;
    use chrono::NaiveDate;

    fn query() -> FeedQuery<'static> {
        let day = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        FeedQuery {
            from: day,
            to: day,
            category: "Company Update",
            subcategory: "General",
            scrip_code: None,
        }
    }

    #[tokio::test]
    async fn stops_when_total_reached_without_extra_request() {
        let source = ScriptedSource::new()
            .page(vec![1, 2], Some(4))
            .page(vec![3, 4], None)
            .page(vec![5], None);
        let retry = RetryPolicy::new(test_config::retry());

        let records = PaginatedFetcher::new(&source, &retry)
            .fetch(&query())
            .await
            .unwrap();

        assert_eq!(records, vec![1, 2, 3, 4]);
        assert_eq!(source.requested_pages(), vec![1, 2]);
    }

    #[tokio::test]
    async fn empty_page_terminates_even_if_total_not_reached() {
        let source = ScriptedSource::new()
            .page(vec![1, 2], Some(10))
            .page(vec![], None);
        let retry = RetryPolicy::new(test_config::retry());

        let records = PaginatedFetcher::new(&source, &retry)
            .fetch(&query())
            .await
            .unwrap();

        assert_eq!(records, vec![1, 2]);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn zero_total_reads_one_page() {
        let source = ScriptedSource::new().page(vec![], Some(0)).page(vec![9], None);
        let retry = RetryPolicy::new(test_config::retry());

        let records = PaginatedFetcher::new(&source, &retry)
            .fetch(&query())
            .await
            .unwrap();

        assert!(records.is_empty());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_total_keeps_first_page_only() {
        let source = ScriptedSource::new().page(vec![7, 8], None).page(vec![9], None);
        let retry = RetryPolicy::new(test_config::retry());

        let records = PaginatedFetcher::new(&source, &retry)
            .fetch(&query())
            .await
            .unwrap();

        assert_eq!(records, vec![7, 8]);
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn mid_pagination_failure_restarts_from_first_page() {
        let source = ScriptedSource::new()
            .page(vec![1, 2], Some(3))
            .fail(Error::status(503, "Service Unavailable"))
            .page(vec![1, 2], Some(3))
            .page(vec![3], None);
        let retry = RetryPolicy::new(test_config::retry());

        let records = PaginatedFetcher::new(&source, &retry)
            .fetch(&query())
            .await
            .unwrap();

        assert_eq!(records, vec![1, 2, 3]);
        assert_eq!(source.requested_pages(), vec![1, 2, 1, 2]);
    }

    #[tokio::test]
    async fn client_error_is_not_retried() {
        let source: ScriptedSource<u32> =
            ScriptedSource::new().fail(Error::status(404, "Not Found"));
        let retry = RetryPolicy::new(test_config::retry());

        let result = PaginatedFetcher::new(&source, &retry).fetch(&query()).await;

        assert!(matches!(result, Err(Error::Connection(_))));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn transient_errors_are_retried_then_succeed() {
        let source = ScriptedSource::new()
            .fail(Error::Timeout("timeout".into()))
            .fail(Error::status(500, "Server Error"))
            .page(vec![42], Some(1));
        let retry = RetryPolicy::new(test_config::retry());

        let records = PaginatedFetcher::new(&source, &retry)
            .fetch(&query())
            .await
            .unwrap();

        assert_eq!(records, vec![42]);
        assert_eq!(source.call_count(), 3);
    }
}
