//! Outbound adapters (driven side).

pub mod archive;
pub mod bse;
pub mod http;
pub mod nse;
pub mod parse;
