//! Video search and quote ports.

use async_trait::async_trait;

use crate::upstream::domain::{UpstreamResult, VideoResult, WowQuote};

/// Searches a video platform.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Returns up to `max_results` hits in relevance order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::upstream::domain::UpstreamError`] on failure. An
    /// empty result list is not an error.
    async fn search(&self, query: &str, max_results: u8) -> UpstreamResult<Vec<VideoResult>>;
}

/// Serves random movie quotes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Returns one random quote.
    ///
    /// # Errors
    ///
    /// Returns [`crate::upstream::domain::UpstreamError`] on failure.
    async fn random_quote(&self) -> UpstreamResult<WowQuote>;
}
