//! Rate limiter port.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::{CooldownSpec, RateDecision, RateLimitKey};

/// Result type for rate limiter operations.
pub type RateLimitResult<T> = Result<T, RateLimitError>;

/// Sliding-window invocation counter shared by all concurrent invocations.
///
/// Implementations must serialize checks for the same key so two concurrent
/// invocations can never both take the last free slot.
pub trait RateLimiter: Send + Sync {
    /// Prunes expired entries for `key`, then records `now` and returns
    /// [`RateDecision::Allowed`] if fewer than `spec.max_invocations()`
    /// remain, or returns [`RateDecision::Denied`] without recording.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError`] when the limiter state is unusable.
    fn check_and_record(
        &self,
        key: &RateLimitKey,
        now: DateTime<Utc>,
        spec: CooldownSpec,
    ) -> RateLimitResult<RateDecision>;
}

/// Errors returned by rate limiter implementations.
#[derive(Debug, Clone, Error)]
pub enum RateLimitError {
    /// The shared state could not be accessed.
    #[error("rate limiter state unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl RateLimitError {
    /// Wraps a state access error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
