//! Port contracts for external data sources.
//!
//! Every call may suspend; none is retried.

pub mod character;
pub mod game;
pub mod media;
pub mod tabular;

pub use character::CharacterSource;
pub use game::GameDataSource;
pub use media::{QuoteSource, VideoSearch};
pub use tabular::TabularSource;
