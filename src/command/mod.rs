//! Command registration, admission and dispatch.
//!
//! Every incoming invocation is resolved against the [`services::CommandRegistry`],
//! validated against the command's parameter schema, and passed through the
//! [`services::AdmissionPipeline`] (blacklist, then role check, then
//! sliding-window rate limit) before its handler runs. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
