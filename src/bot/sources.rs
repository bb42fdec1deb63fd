//! Upstream ports shared by the command bodies.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{Secrets, UpstreamSettings};
use crate::upstream::{
    adapters::{
        http::{BattleNetClient, RaiderIoClient, SheetsClient, WowQuoteClient, YouTubeClient},
        memory::Unconfigured,
    },
    domain::UpstreamResult,
    ports::{CharacterSource, GameDataSource, QuoteSource, TabularSource, VideoSearch},
};

/// One handle per external data source.
#[derive(Clone)]
pub struct Sources {
    /// Token price and realm status.
    pub game: Arc<dyn GameDataSource>,
    /// Character profiles.
    pub characters: Arc<dyn CharacterSource>,
    /// Video search.
    pub videos: Arc<dyn VideoSearch>,
    /// Spreadsheets.
    pub sheets: Arc<dyn TabularSource>,
    /// Movie quotes.
    pub quotes: Arc<dyn QuoteSource>,
}

impl std::fmt::Debug for Sources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sources").finish_non_exhaustive()
    }
}

impl Sources {
    /// Builds the HTTP adapters. Sources whose secret is missing are
    /// replaced by a stand-in that fails every call as not configured.
    ///
    /// # Errors
    ///
    /// Returns [`crate::upstream::domain::UpstreamError::Transport`] when an
    /// HTTP client cannot be built.
    pub fn from_settings(settings: &UpstreamSettings, secrets: &Secrets) -> UpstreamResult<Self> {
        let timeout = settings.timeout();

        let game: Arc<dyn GameDataSource> = match &secrets.battle_net {
            Some((client_id, client_secret)) => {
                let mut client = BattleNetClient::new(client_id, client_secret, timeout)?;
                if let Some(url) = &settings.battle_net_oauth_url {
                    client = client.with_oauth_url(url);
                }
                if let Some(base) = &settings.battle_net_api_base {
                    client = client.with_api_base(base);
                }
                Arc::new(client)
            }
            None => unconfigured("battle.net"),
        };

        let mut characters = RaiderIoClient::new(timeout)?;
        if let Some(base) = &settings.raider_io_base {
            characters = characters.with_base_url(base);
        }

        let videos: Arc<dyn VideoSearch> = match &secrets.youtube_api_key {
            Some(key) => {
                let mut client = YouTubeClient::new(key, timeout)?;
                if let Some(base) = &settings.youtube_base {
                    client = client.with_base_url(base);
                }
                Arc::new(client)
            }
            None => unconfigured("youtube"),
        };

        let sheets: Arc<dyn TabularSource> = match &secrets.sheets_api_key {
            Some(key) => {
                let mut client = SheetsClient::new(key, timeout)?;
                if let Some(base) = &settings.sheets_base {
                    client = client.with_base_url(base);
                }
                Arc::new(client)
            }
            None => unconfigured("google sheets"),
        };

        let mut quotes = WowQuoteClient::new(timeout)?;
        if let Some(base) = &settings.wow_quote_base {
            quotes = quotes.with_base_url(base);
        }

        info!(timeout_secs = settings.timeout_secs, "upstream sources ready");
        Ok(Self {
            game,
            characters: Arc::new(characters),
            videos,
            sheets,
            quotes: Arc::new(quotes),
        })
    }
}

fn unconfigured(source_name: &'static str) -> Arc<Unconfigured> {
    warn!(source = source_name, "credentials missing; source disabled");
    Arc::new(Unconfigured::new(source_name))
}
