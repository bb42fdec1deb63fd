//! Adapters for the upstream ports.

pub mod http;
pub mod memory;
