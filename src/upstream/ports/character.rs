//! Character armory port.

use async_trait::async_trait;

use crate::upstream::domain::{CharacterProfile, UpstreamResult};

/// Looks up public character profiles including equipment.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Fetches the profile of `name` on `realm_slug`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::upstream::domain::UpstreamError::NotFound`] when the
    /// character does not exist, and another variant when the source fails.
    async fn character_profile(
        &self,
        region: &str,
        realm_slug: &str,
        name: &str,
    ) -> UpstreamResult<CharacterProfile>;
}
