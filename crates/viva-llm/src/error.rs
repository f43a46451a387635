//! Provider error types.

use std::time::Duration;

use thiserror::Error;

/// Errors a generation provider can report for one attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider answered but produced no usable text.
    #[error("empty response from {0}")]
    EmptyResponse(String),

    /// The attempt exceeded its deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The provider panicked mid-attempt.
    #[error("{provider} panicked: {message}")]
    Panicked {
        /// Provider name.
        provider: String,
        /// Panic payload, when it was a string.
        message: String,
    },
}
