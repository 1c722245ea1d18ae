//! First filings - spot the first-ever corporate filing of a category.
//!
//! This crate ingests corporate-announcement feeds from Indian stock
//! exchanges (BSE and NSE), decides whether an announcement is the first of
//! its category ever filed by the instrument within a lookback window, and
//! enriches qualifying filings with price and market-cap data.
//!
//! # Architecture
//!
//! Ports and adapters:
//!
//! - **`port::ExchangeClient`** - Normalized announcements and enrichment
//!   - `BseClient` - Paginated, subcategory-based feed
//!   - `NseClient` - Single-page, keyword-only feed
//!
//! - **`application`** - Use cases on top of the port
//!   - `RetryPolicy` - Error classification and exponential backoff
//!   - `PaginatedFetcher` - Page-by-page retrieval as one retryable unit
//!   - `AnnouncementFilter` - Keyword narrowing for catch-all subcategories
//!   - `FirstFilingAnalyzer` - Lookback comparison and enrichment
//!   - `FilingScanner` - One reporting period, every category
//!
//! # Modules
//!
//! - [`adapter`] - Exchange transports, JSON archive and the CLI
//! - [`application`] - Retry, pagination, filtering and analysis
//! - [`domain`] - Exchange-agnostic types: announcements, categories, periods
//! - [`error`] - Error types for the crate
//! - [`infrastructure`] - Configuration, logging and exchange wiring
//! - [`port`] - Trait definitions at the exchange seam
//!
//! # Features
//!
//! - `testkit` - Scripted exchanges and stub servers for tests
//!
//! # Example
//!
//! ```no_run
//! use first_filings::infrastructure::config::settings::Config;
//! use first_filings::infrastructure::exchange::ExchangeFactory;
//!
//! # async fn run() -> first_filings::error::Result<()> {
//! let config = Config::load_or_default(None)?;
//! let analyzer = ExchangeFactory::create_analyzer(&config);
//! let date = chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(chrono::NaiveDate::MIN);
//! let first = analyzer.is_first_filing("500001", "PPT", date, 15, None).await;
//! println!("first filing: {first}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
