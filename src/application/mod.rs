//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod analyzer;
pub mod filter;
pub mod pagination;
pub mod retry;
pub mod scan;

pub use analyzer::{FirstFilingAnalyzer, PeriodAnnouncements};
pub use filter::{AnnouncementFilter, FilingText, MatchScope};
pub use pagination::PaginatedFetcher;
pub use retry::{backoff_delay, retry_with, should_retry, RetryPolicy};
pub use scan::{CategoryFailure, FilingScanner, ScanReport, ScanRequest, ScanStatus, DEFAULT_LOOKBACK_YEARS};
