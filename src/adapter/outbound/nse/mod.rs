//! NSE (National Stock Exchange) announcement feed.
//!
//! Keyword-only provider: the feed has no subcategories, so every record is
//! matched against the label's keywords. Symbols double as scrip codes.

pub mod api;
pub mod client;
pub mod dto;
pub mod settings;

pub use api::{NseApi, NseHttpApi};
pub use client::NseClient;
pub use settings::NseConfig;
