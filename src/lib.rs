//! Beymax: a guild chat bot.
//!
//! Commands pass through a fixed pipeline before their bodies run: the
//! name is resolved against the registry, arguments are validated, and the
//! admission pipeline applies the blacklist, role gate and sliding-window
//! cooldowns.
//!
//! # Architecture
//!
//! Beymax follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP clients, memory)
//!
//! # Modules
//!
//! - [`command`]: Command registry, admission and dispatch
//! - [`readiness`]: Raid readiness evaluation of a character's equipment
//! - [`upstream`]: Game, video, spreadsheet and quote data sources
//! - [`bot`]: The concrete command set
//! - [`config`]: File and environment configuration
//! - [`host`]: Line-delimited JSON front end
//! - [`telemetry`]: Logging setup

pub mod bot;
pub mod command;
pub mod config;
pub mod host;
pub mod readiness;
pub mod telemetry;
pub mod upstream;
