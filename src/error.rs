use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The category label is not present in the configured category table.
    #[error("unknown category label: {label}")]
    UnknownCategory { label: String },

    /// The provider did not answer in time.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Transport failure. When the provider answered with a status the
    /// message reads `"<code>: <reason>"`.
    #[error("connection error: {0}")]
    Connection(String),

    /// The provider answered but the payload could not be understood.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Build a connection error carrying an HTTP status in the
    /// `"<code>: <reason>"` message convention.
    #[must_use]
    pub fn status(code: u16, reason: impl std::fmt::Display) -> Self {
        Self::Connection(format!("{code}: {reason}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
