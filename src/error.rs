use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;

/// Typed error produced by an exception factory for a single response
#[derive(Debug, Clone)]
pub struct ApiException {
    /// Name of the operation that produced the response (e.g. "GetOrgsID")
    pub operation: String,
    pub status: u16,
    pub headers: HashMap<String, String>,
    /// Raw response body, kept for diagnostics
    pub body: Bytes,
    pub message: String,
}

impl ApiException {
    pub fn new(
        operation: impl Into<String>,
        status: u16,
        headers: HashMap<String, String>,
        body: Bytes,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            status,
            headers,
            body,
            message: message.into(),
        }
    }

    /// Response body as text, lossy
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl std::fmt::Display for ApiException {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Error calling {}: HTTP {} - {}",
            self.operation, self.status, self.message
        )
    }
}

impl std::error::Error for ApiException {}

/// InfluxDB client error types
#[derive(Error, Debug)]
pub enum InfluxError {
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Request was cancelled")]
    Cancelled,

    #[error("{0}")]
    Api(#[from] ApiException),

    #[error("Failed to deserialize response (HTTP {status}): {message}")]
    Deserialize {
        status: u16,
        message: String,
        body: Bytes,
    },

    #[error("Unsupported response content type: {0}")]
    UnsupportedContentType(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing failed: {0}")]
    Url(#[from] url::ParseError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for InfluxDB client operations
pub type InfluxResult<T> = Result<T, InfluxError>;

impl InfluxError {
    /// Create an authentication error
    pub fn auth_error(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Classify a reqwest failure, separating timeouts from other transport errors.
    /// A request reqwest refused to build never left the process.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_builder() {
            Self::InvalidParameter(err.to_string())
        } else {
            Self::Transport(err)
        }
    }

    /// HTTP status carried by the error, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(exception) => Some(exception.status),
            Self::Deserialize { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for failures that never reached a server response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_) | Self::Cancelled)
    }
}
