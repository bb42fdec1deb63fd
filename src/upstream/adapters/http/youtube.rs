//! YouTube Data API search adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::client::{build_client, decode_json, fetch_bytes};
use crate::upstream::{
    domain::{UpstreamResult, VideoResult},
    ports::VideoSearch,
};

const SOURCE: &str = "youtube";
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Decodes a `search.list` payload.
///
/// # Errors
///
/// Returns [`crate::upstream::domain::UpstreamError::Malformed`] when an
/// item lacks its video id or title.
pub fn decode_search(body: &[u8]) -> UpstreamResult<Vec<VideoResult>> {
    let search: SearchBody = decode_json(SOURCE, body)?;
    Ok(search
        .items
        .into_iter()
        .map(|item| VideoResult {
            video_id: item.id.video_id,
            title: item.snippet.title,
        })
        .collect())
}

/// Video search backed by the YouTube Data API v3.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    /// Creates a client authenticated with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::upstream::domain::UpstreamError::Transport`] when the
    /// HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> UpstreamResult<Self> {
        Ok(Self {
            http: build_client(SOURCE, timeout)?,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
        })
    }

    /// Overrides the API base.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search(&self, query: &str, max_results: u8) -> UpstreamResult<Vec<VideoResult>> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let max = max_results.to_string();
        let request = self.http.get(url).query(&[
            ("part", "snippet"),
            ("type", "video"),
            ("maxResults", max.as_str()),
            ("q", query),
            ("key", self.api_key.as_str()),
        ]);
        let body = fetch_bytes(SOURCE, request).await?;
        decode_search(&body)
    }
}
