//! In-memory adapters for command ports.

mod rate_limiter;

pub use rate_limiter::{InMemoryRateLimiter, SWEEP_INTERVAL};
