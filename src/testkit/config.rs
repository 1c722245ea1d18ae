//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::adapter::outbound::http::HttpConfig;
use crate::infrastructure::config::retry::RetryConfig;

/// Retry config with zero delays, so tests never sleep.
pub fn retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        min_delay_ms: 0,
        max_delay_ms: 0,
        multiplier: 1.0,
        jitter: false,
    }
}

/// HTTP config for talking to a local stub server.
pub fn http() -> HttpConfig {
    HttpConfig {
        timeout_ms: 2000,
        connect_timeout_ms: 1000,
        use_system_proxy: false,
        ..Default::default()
    }
}
