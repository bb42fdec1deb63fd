//! In-memory upstream sources for tests and offline runs.

mod sources;

pub use sources::{
    InMemoryCharacters, InMemoryGameData, InMemoryQuotes, InMemorySheets, InMemoryVideos,
    Unconfigured,
};
