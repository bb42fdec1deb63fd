//! Port contracts for command handling.
//!
//! Ports define infrastructure-agnostic interfaces used by the admission
//! pipeline and dispatcher.

pub mod handler;
pub mod rate_limiter;

pub use handler::{CommandHandler, HandlerError, HandlerResult};
pub use rate_limiter::{RateLimitError, RateLimitResult, RateLimiter};
