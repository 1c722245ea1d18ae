//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`ExchangeClient`] - Normalized announcements and enrichment per exchange
//! - [`PageSource`] - One page of raw records from a provider feed

mod exchange;

pub use exchange::{ExchangeClient, FeedQuery, Page, PageSource};
