//! Line-delimited JSON host.
//!
//! Stands in for a chat gateway: each input line is a [`HostEvent`], each
//! output line the matching [`HostReply`]. Text commands use the same
//! `/command key=value` syntax a chat message would.

mod event;
mod server;

pub use event::{EventError, HostEvent, HostReply};
pub use server::{handle_line, serve};
