//! Error types for backend communication.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by the backend client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Build {
        /// Underlying reqwest error.
        source: reqwest::Error,
    },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Request URL.
        url: String,
        /// Underlying reqwest error.
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        /// Request URL.
        url: String,
        /// Response status.
        status: StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        /// Request URL.
        url: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The response decoded but is missing an expected part.
    #[error("unexpected response shape from {url}: {detail}")]
    Shape {
        /// Request URL.
        url: String,
        /// What was missing or wrong.
        detail: String,
    },
}

impl ClientError {
    /// Returns true for failures worth retrying: connection-level errors and
    /// server-side (5xx) statuses. Client errors (4xx) and decode failures
    /// never retry.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { source, .. } => {
                source.is_connect() || source.is_timeout() || source.is_request()
            }
            Self::Status { status, .. } => status.is_server_error(),
            Self::Build { .. } | Self::Decode { .. } | Self::Shape { .. } => false,
        }
    }
}
