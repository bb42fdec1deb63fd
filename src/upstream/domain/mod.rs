//! Values returned by upstream data sources.

mod character;
mod error;
mod game;
mod media;

pub use character::{CharacterProfile, realm_slug};
pub use error::{UpstreamError, UpstreamResult};
pub use game::{RealmStatus, TokenPrice};
pub use media::{VideoResult, WowQuote};
