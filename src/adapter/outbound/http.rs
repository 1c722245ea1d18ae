//! Shared HTTP plumbing for provider adapters.
//!
//! Transport failures are translated into [`Error::Timeout`] and
//! [`Error::Connection`] (with `"<code>: <reason>"` messages for HTTP
//! statuses) so the retry classifier sees one convention for every provider.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{trace, warn};
use url::Url;

use crate::error::{Error, Result};

/// HTTP client settings shared by all providers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// User-Agent sent with every request. Both exchanges reject
    /// requests that do not look like a browser.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    #[serde(default = "default_use_system_proxy")]
    pub use_system_proxy: bool,
}

const fn default_timeout_ms() -> u64 {
    15000
}

const fn default_connect_timeout_ms() -> u64 {
    5000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
        .to_string()
}

const fn default_use_system_proxy() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            user_agent: default_user_agent(),
            use_system_proxy: default_use_system_proxy(),
        }
    }
}

impl HttpConfig {
    /// Build a client with these timeouts and the given default headers.
    #[must_use]
    pub fn build_client(&self, headers: HeaderMap, cookie_store: bool) -> HttpClient {
        let mut builder = HttpClient::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .user_agent(self.user_agent.clone())
            .default_headers(headers)
            .cookie_store(cookie_store);
        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }
        builder
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            })
    }
}

/// Map a reqwest failure onto the crate's transport error convention.
#[must_use]
pub fn transport_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(err.to_string())
    } else if let Some(status) = err.status() {
        Error::status(status.as_u16(), status.canonical_reason().unwrap_or("Unknown"))
    } else if err.is_decode() {
        Error::Decode(err.to_string())
    } else {
        Error::Connection(err.to_string())
    }
}

/// GET `url` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(http: &HttpClient, url: Url) -> Result<T> {
    trace!(url = %url, "GET");
    let response = http
        .get(url.clone())
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::status(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
        ));
    }

    let body = response.text().await.map_err(transport_error)?;
    serde_json::from_str(&body).map_err(|err| Error::Decode(format!("{}: {err}", url.path())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::retry::should_retry;
    use crate::testkit::http::StubServer;

    #[test]
    fn defaults_are_browser_like_with_timeouts() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout_ms, 15000);
        assert_eq!(config.connect_timeout_ms, 5000);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: HttpConfig = toml::from_str("timeout_ms = 250").unwrap();
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(config.connect_timeout_ms, 5000);
    }

    #[tokio::test]
    async fn client_error_status_maps_to_terminal_connection_error() {
        let server = StubServer::start(vec![(404, String::new())]).await;
        let http = crate::testkit::config::http().build_client(HeaderMap::new(), false);

        let err = get_json::<serde_json::Value>(&http, server.url("/missing"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Connection(ref m) if m == "404: Not Found"));
        assert!(!should_retry(&err));
    }

    #[tokio::test]
    async fn server_error_status_is_retryable() {
        let server = StubServer::start(vec![(503, String::new())]).await;
        let http = crate::testkit::config::http().build_client(HeaderMap::new(), false);

        let err = get_json::<serde_json::Value>(&http, server.url("/busy"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Connection(ref m) if m.starts_with("503:")));
        assert!(should_retry(&err));
    }

    #[tokio::test]
    async fn json_body_is_decoded_and_garbage_is_a_decode_error() {
        let server = StubServer::start(vec![
            (200, r#"{"ok": true}"#.to_string()),
            (200, "<html>maintenance</html>".to_string()),
        ])
        .await;
        let http = crate::testkit::config::http().build_client(HeaderMap::new(), false);

        let value: serde_json::Value = get_json(&http, server.url("/a")).await.unwrap();
        assert_eq!(value["ok"], true);

        let err = get_json::<serde_json::Value>(&http, server.url("/b"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert_eq!(server.requests(), vec!["/a", "/b"]);
    }
}
