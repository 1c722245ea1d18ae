//! BSE (Bombay Stock Exchange) announcement feed.
//!
//! Paginated, subcategory-based provider. Catch-all subcategories such as
//! "General" are narrowed with the category table's keywords.

pub mod api;
pub mod client;
pub mod dto;
pub mod settings;

pub use api::{BseApi, BseHttpApi};
pub use client::BseClient;
pub use settings::BseConfig;
