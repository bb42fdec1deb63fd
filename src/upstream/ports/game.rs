//! Game data port.

use async_trait::async_trait;

use crate::upstream::domain::{RealmStatus, TokenPrice, UpstreamResult};

/// Read access to live game data.
#[async_trait]
pub trait GameDataSource: Send + Sync {
    /// Fetches the current token price for `region`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::upstream::domain::UpstreamError`] when the source is
    /// unreachable or the payload is malformed.
    async fn token_price(&self, region: &str, locale: &str) -> UpstreamResult<TokenPrice>;

    /// Fetches the status of the connected realm group `realm_id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::upstream::domain::UpstreamError`] when the source is
    /// unreachable or the payload is malformed.
    async fn connected_realm(
        &self,
        region: &str,
        locale: &str,
        realm_id: u32,
    ) -> UpstreamResult<RealmStatus>;
}
