//! Command bodies.
//!
//! Each handler owns the configuration slice and upstream ports it needs
//! and implements [`crate::command::ports::CommandHandler`]. Embed and text
//! formatting is exposed as plain functions so it can be checked without
//! running a handler.

pub mod help;
pub mod media;
pub mod member;
pub mod readiness;
pub mod text;
pub mod upstream;

pub use help::{HelpHandler, help_columns};
pub use media::{MightconHandler, PickHandler, list_media};
pub use member::{MemberInfoHandler, join_age, member_embed};
pub use readiness::{ReadinessHandler, ReadinessView, RequirementSheet, readiness_embed};
pub use text::{MockHandler, RandomLinkHandler, TemplateHandler, mock_text};
pub use upstream::{
    GUILD_LOGO_URL, GameLocation, JamsHandler, MovieHandler, MovieRow, MovieSheet, StatusHandler,
    TokenHandler, WowHandler, format_quote, movie_embed, status_embed, token_embed,
};
