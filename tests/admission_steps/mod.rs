//! Step definitions for command admission scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
