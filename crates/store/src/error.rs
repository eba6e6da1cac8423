//! Error types for the store adapters

use photospot_core::ErrorCode;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// PostgREST answered with a non-success status. The body is kept for
    /// debugging but left out of `Display`, since it can echo row data.
    #[error("Store returned {status}")]
    Response {
        /// HTTP status code
        status: u16,
        /// Body text returned by PostgREST
        message: String,
    },

    /// A row that parsed as JSON but breaks a domain rule
    #[error("Malformed row: {0}")]
    Decode(String),

    /// Unparseable `Content-Range` header
    #[error("Invalid Content-Range header: {0}")]
    ContentRange(String),
}

impl StoreError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a response error
    pub fn response(status: u16, message: impl Into<String>) -> Self {
        Self::Response {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// One-line description safe to log: no response bodies, no row values.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Request(e) if e.is_timeout() => "request timed out".to_string(),
            Self::Request(e) if e.is_connect() => "connection failed".to_string(),
            Self::Request(_) => "request failed".to_string(),
            Self::Json(e) => format!("undecodable JSON ({:?}) at line {} column {}", e.classify(), e.line(), e.column()),
            Self::Response { status, .. } => format!("store returned {status}"),
            Self::Config(_) | Self::Decode(_) | Self::ContentRange(_) => self.to_string(),
        }
    }

    /// Whether a later attempt could succeed. Informational only; nothing
    /// in this crate retries.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::Response { status, .. } => *status >= 500 || *status == 429,
            Self::Json(_) | Self::Config(_) | Self::Decode(_) | Self::ContentRange(_) => false,
        }
    }

    /// Shared error code
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Request(_) => ErrorCode::StoreUnavailable,
            Self::Response { .. } => ErrorCode::StoreResponse,
            Self::Json(_) | Self::Decode(_) | Self::ContentRange(_) => ErrorCode::StoreDecode,
            Self::Config(_) => ErrorCode::InvalidConfigValue,
        }
    }
}

impl From<StoreError> for photospot_core::Error {
    fn from(err: StoreError) -> Self {
        photospot_core::Error::new(err.code(), err.to_string())
    }
}
