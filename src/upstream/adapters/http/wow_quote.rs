//! Owen Wilson "wow" quote adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::client::{build_client, decode_json, fetch_bytes};
use crate::upstream::{
    domain::{UpstreamError, UpstreamResult, WowQuote},
    ports::QuoteSource,
};

const SOURCE: &str = "wow api";
const DEFAULT_BASE_URL: &str = "https://owen-wilson-wow-api.onrender.com";

#[derive(Debug, Default, Deserialize)]
struct VideoLinks {
    #[serde(rename = "360p", default)]
    low: Option<String>,
    #[serde(rename = "720p", default)]
    high: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WowBody {
    movie: String,
    year: u16,
    director: String,
    character: String,
    timestamp: String,
    current_wow_in_movie: u32,
    total_wows_in_movie: u32,
    full_line: String,
    #[serde(default)]
    video: VideoLinks,
}

/// Decodes a `/wows/random` payload (a list holding one quote).
///
/// The smallest available clip is preferred.
///
/// # Errors
///
/// Returns [`UpstreamError::Malformed`] when the list is empty or a quote
/// lacks required fields.
pub fn decode_random(body: &[u8]) -> UpstreamResult<WowQuote> {
    let quotes: Vec<WowBody> = decode_json(SOURCE, body)?;
    let quote = quotes
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::malformed(SOURCE, "no quote returned"))?;
    Ok(WowQuote {
        movie: quote.movie,
        year: quote.year,
        director: quote.director,
        character: quote.character,
        timestamp: quote.timestamp,
        current_wow_in_movie: quote.current_wow_in_movie,
        total_wows_in_movie: quote.total_wows_in_movie,
        full_line: quote.full_line,
        video_url: quote.video.low.or(quote.video.high),
    })
}

/// Quote source backed by the public wow API.
#[derive(Debug, Clone)]
pub struct WowQuoteClient {
    http: Client,
    base_url: String,
}

impl WowQuoteClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(timeout: Duration) -> UpstreamResult<Self> {
        Ok(Self {
            http: build_client(SOURCE, timeout)?,
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl QuoteSource for WowQuoteClient {
    async fn random_quote(&self) -> UpstreamResult<WowQuote> {
        let url = format!("{}/wows/random", self.base_url.trim_end_matches('/'));
        let body = fetch_bytes(SOURCE, self.http.get(url)).await?;
        decode_random(&body)
    }
}
