//! Fixed-data implementations of the upstream ports.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::upstream::{
    domain::{
        CharacterProfile, RealmStatus, TokenPrice, UpstreamError, UpstreamResult, VideoResult,
        WowQuote,
    },
    ports::{CharacterSource, GameDataSource, QuoteSource, TabularSource, VideoSearch},
};

/// Game data served from memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameData {
    token: Option<TokenPrice>,
    realms: HashMap<u32, RealmStatus>,
}

impl InMemoryGameData {
    /// Creates an empty source; every call reports the data as missing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `price` for every region.
    #[must_use]
    pub fn with_token_price(mut self, price: TokenPrice) -> Self {
        self.token = Some(price);
        self
    }

    /// Serves `status` for `realm_id`.
    #[must_use]
    pub fn with_realm(mut self, realm_id: u32, status: RealmStatus) -> Self {
        self.realms.insert(realm_id, status);
        self
    }
}

#[async_trait]
impl GameDataSource for InMemoryGameData {
    async fn token_price(&self, _region: &str, _locale: &str) -> UpstreamResult<TokenPrice> {
        self.token.clone().ok_or(UpstreamError::NotFound {
            source_name: "memory game data",
        })
    }

    async fn connected_realm(
        &self,
        _region: &str,
        _locale: &str,
        realm_id: u32,
    ) -> UpstreamResult<RealmStatus> {
        self.realms
            .get(&realm_id)
            .cloned()
            .ok_or(UpstreamError::NotFound {
                source_name: "memory game data",
            })
    }
}

/// Character profiles served from memory, keyed by realm slug and
/// lower-cased name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCharacters {
    profiles: HashMap<(String, String), CharacterProfile>,
}

impl InMemoryCharacters {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a profile reachable as `name` on `realm_slug`.
    #[must_use]
    pub fn with_profile(mut self, realm_slug: &str, profile: CharacterProfile) -> Self {
        let key = (realm_slug.to_owned(), profile.name.to_lowercase());
        self.profiles.insert(key, profile);
        self
    }
}

#[async_trait]
impl CharacterSource for InMemoryCharacters {
    async fn character_profile(
        &self,
        _region: &str,
        realm_slug: &str,
        name: &str,
    ) -> UpstreamResult<CharacterProfile> {
        self.profiles
            .get(&(realm_slug.to_owned(), name.to_lowercase()))
            .cloned()
            .ok_or(UpstreamError::NotFound {
                source_name: "memory characters",
            })
    }
}

/// Video search returning the same hits for every query.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVideos {
    results: Vec<VideoResult>,
}

impl InMemoryVideos {
    /// Creates a source answering every search with `results`.
    #[must_use]
    pub const fn new(results: Vec<VideoResult>) -> Self {
        Self { results }
    }
}

#[async_trait]
impl VideoSearch for InMemoryVideos {
    async fn search(&self, _query: &str, max_results: u8) -> UpstreamResult<Vec<VideoResult>> {
        Ok(self
            .results
            .iter()
            .take(usize::from(max_results))
            .cloned()
            .collect())
    }
}

/// Spreadsheet ranges served from memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySheets {
    tables: HashMap<(String, String), Vec<Vec<String>>>,
}

impl InMemorySheets {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `rows` for `range` of `spreadsheet_id`.
    #[must_use]
    pub fn with_rows(mut self, spreadsheet_id: &str, range: &str, rows: Vec<Vec<String>>) -> Self {
        self.tables
            .insert((spreadsheet_id.to_owned(), range.to_owned()), rows);
        self
    }
}

#[async_trait]
impl TabularSource for InMemorySheets {
    async fn rows(&self, spreadsheet_id: &str, range: &str) -> UpstreamResult<Vec<Vec<String>>> {
        self.tables
            .get(&(spreadsheet_id.to_owned(), range.to_owned()))
            .cloned()
            .ok_or(UpstreamError::NotFound {
                source_name: "memory sheets",
            })
    }
}

/// Quotes served from memory in a fixed order, cycling on each call.
#[derive(Debug, Default)]
pub struct InMemoryQuotes {
    quotes: Vec<WowQuote>,
    next: std::sync::atomic::AtomicUsize,
}

impl InMemoryQuotes {
    /// Creates a source cycling through `quotes`.
    #[must_use]
    pub const fn new(quotes: Vec<WowQuote>) -> Self {
        Self {
            quotes,
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuoteSource for InMemoryQuotes {
    async fn random_quote(&self) -> UpstreamResult<WowQuote> {
        let position = self
            .next
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            .checked_rem(self.quotes.len())
            .ok_or(UpstreamError::NotFound {
                source_name: "memory quotes",
            })?;
        self.quotes
            .get(position)
            .cloned()
            .ok_or_else(|| UpstreamError::malformed("memory quotes", "quote index out of range"))
    }
}

/// Stand-in for a source whose credentials are not configured.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured {
    source_name: &'static str,
}

impl Unconfigured {
    /// Creates a stand-in reporting `source_name` as unconfigured.
    #[must_use]
    pub const fn new(source_name: &'static str) -> Self {
        Self { source_name }
    }

    const fn error(self) -> UpstreamError {
        UpstreamError::NotConfigured {
            source_name: self.source_name,
        }
    }
}

#[async_trait]
impl GameDataSource for Unconfigured {
    async fn token_price(&self, _region: &str, _locale: &str) -> UpstreamResult<TokenPrice> {
        Err(self.error())
    }

    async fn connected_realm(
        &self,
        _region: &str,
        _locale: &str,
        _realm_id: u32,
    ) -> UpstreamResult<RealmStatus> {
        Err(self.error())
    }
}

#[async_trait]
impl VideoSearch for Unconfigured {
    async fn search(&self, _query: &str, _max_results: u8) -> UpstreamResult<Vec<VideoResult>> {
        Err(self.error())
    }
}

#[async_trait]
impl TabularSource for Unconfigured {
    async fn rows(&self, _spreadsheet_id: &str, _range: &str) -> UpstreamResult<Vec<Vec<String>>> {
        Err(self.error())
    }
}
