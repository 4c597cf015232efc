//! Error types for retrieval and submission.

use thiserror::Error;

/// Longest response body excerpt kept in a status error.
const BODY_EXCERPT_LEN: usize = 200;

/// Errors that can occur while talking to the patient service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Connection failure, timeout or body read failure.
    #[error("network error: {0}")]
    Network(String),

    /// Endpoint URL or API key could not be used.
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
        /// Leading part of the response body.
        body: String,
    },

    /// Server asked us to slow down.
    #[error("rate limited, retry after {retry_after} seconds")]
    RateLimited {
        /// Seconds requested by the `Retry-After` header.
        retry_after: u64,
    },

    /// Response body is not JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Response body is JSON but has no recognized record list.
    #[error("unexpected response shape on page {page}: {reason}")]
    Schema {
        /// Page that produced the body.
        page: u32,
        /// What was missing or malformed.
        reason: String,
    },

    /// A page kept failing after every allowed attempt.
    #[error("page {page} failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Page that could not be fetched.
        page: u32,
        /// Attempts made, including the first.
        attempts: u32,
        /// The final failure.
        last: Box<ClientError>,
    },

    /// The server kept declaring more pages past the configured bound.
    #[error("pagination did not finish within {max_pages} pages")]
    PageLimitExceeded {
        /// Configured page bound.
        max_pages: u32,
    },
}

impl ClientError {
    /// Build a status error, truncating the body to a short excerpt.
    pub fn status(status: u16, url: impl Into<String>, body: &str) -> Self {
        let body = match body.char_indices().nth(BODY_EXCERPT_LEN) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        Self::Status {
            status,
            url: url.into(),
            body,
        }
    }

    /// Returns a short message suitable for the CLI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the patient service. Check your connection.",
            Self::Config(_) => "The endpoint URL or API key is not usable.",
            Self::Status { status: 401 | 403, .. } => "The API key was rejected.",
            Self::Status { .. } => "The patient service returned an error.",
            Self::RateLimited { .. } => "The patient service is rate limiting requests.",
            Self::JsonParse(_) | Self::Schema { .. } => {
                "The patient service returned an unexpected response."
            }
            Self::RetriesExhausted { .. } => "The patient service kept failing; nothing was submitted.",
            Self::PageLimitExceeded { .. } => "The patient listing did not finish paginating.",
        }
    }

    /// Returns whether the same request may succeed if repeated.
    ///
    /// Timeouts, connection failures, 408/429/5xx responses and garbled or
    /// unrecognized bodies are treated as transient.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::RateLimited { .. } | Self::JsonParse(_) | Self::Schema { .. } => {
                true
            }
            Self::Status { status, .. } => *status == 408 || *status >= 500,
            Self::Config(_) | Self::RetriesExhausted { .. } | Self::PageLimitExceeded { .. } => {
                false
            }
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
