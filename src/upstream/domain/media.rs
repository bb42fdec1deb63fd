//! Video search results and movie quotes.

use serde::{Deserialize, Serialize};

/// One video search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    /// Platform video id.
    pub video_id: String,
    /// Video title.
    pub title: String,
}

impl VideoResult {
    /// Returns the watch page URL.
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// A single "wow" from a movie, with its position among the movie's wows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WowQuote {
    /// Movie title.
    pub movie: String,
    /// Release year.
    pub year: u16,
    /// Director.
    pub director: String,
    /// Character speaking the line.
    pub character: String,
    /// Timestamp of the line within the movie.
    pub timestamp: String,
    /// One-based index of this wow in the movie.
    pub current_wow_in_movie: u32,
    /// Number of wows in the movie.
    pub total_wows_in_movie: u32,
    /// The full line.
    pub full_line: String,
    /// Clip of the line, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}
