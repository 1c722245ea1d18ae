//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`config`] - Canonical test configurations (zero-delay retry, no-proxy HTTP).
//! - [`source`] - `ScriptedSource`, a [`PageSource`](crate::port::PageSource) fake.
//! - [`exchange`] - `ScriptedExchange`, an [`ExchangeClient`](crate::port::ExchangeClient) fake.
//! - [`provider`] - Scripted BSE/NSE transports for exercising the real clients.
//! - [`http`] - `StubServer`, a one-response-per-connection HTTP server.
//! - [`domain`] - Builders for announcements and dates.

pub mod config;
pub mod domain;
pub mod exchange;
pub mod http;
pub mod provider;
pub mod source;
