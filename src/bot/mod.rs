//! The guild bot's command set.
//!
//! Command bodies live in [`handlers`] and [`links`]; [`commands`] wires
//! them to configuration and upstream [`sources`] and produces the
//! [`crate::command::services::CommandRegistry`] the dispatcher serves.

pub mod calendar;
pub mod commands;
pub mod handlers;
pub mod links;
pub mod picker;
pub mod render;
pub mod sources;

pub use calendar::{SeasonalVariant, seasonal_variant};
pub use commands::{BuildError, MEMBER_INFO_LABEL, build_registry};
pub use links::{STATIC_LINKS, StaticLink, StaticLinkHandler};
pub use picker::{FixedPicker, Picker, RandomPicker, pick};
pub use render::{invocation_context, render_template};
pub use sources::Sources;

#[cfg(test)]
mod tests;
