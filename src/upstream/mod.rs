//! External data sources used by command bodies.
//!
//! Each source sits behind an async port so handlers can be exercised with
//! the in-memory adapters. The HTTP adapters bound every request with a
//! client timeout and never retry.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
