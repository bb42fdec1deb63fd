//! Upstream failure taxonomy.

use thiserror::Error;

/// Result type for upstream calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Failures of external data sources. None of them are retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The source answered with a non-success status.
    #[error("{source_name} returned HTTP {status}")]
    Unavailable {
        /// Which source failed.
        source_name: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// The source has no record for the requested key.
    #[error("{source_name} has no matching record")]
    NotFound {
        /// Which source was asked.
        source_name: &'static str,
    },

    /// The request did not complete within its timeout.
    #[error("{source_name} timed out")]
    Timeout {
        /// Which source timed out.
        source_name: &'static str,
    },

    /// The request could not be sent or the response not read.
    #[error("{source_name} transport error: {reason}")]
    Transport {
        /// Which source failed.
        source_name: &'static str,
        /// Underlying error text.
        reason: String,
    },

    /// The response lacked expected fields or could not be decoded.
    #[error("{source_name} returned malformed data: {reason}")]
    Malformed {
        /// Which source failed.
        source_name: &'static str,
        /// What was wrong with the payload.
        reason: String,
    },

    /// The source is not configured (for example a missing API key).
    #[error("{source_name} is not configured")]
    NotConfigured {
        /// Which source is missing configuration.
        source_name: &'static str,
    },
}

impl UpstreamError {
    /// Creates a [`UpstreamError::Malformed`] error.
    pub fn malformed(source_name: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            source_name,
            reason: reason.into(),
        }
    }
}
