//! Battle.net game data adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::client::{build_client, decode_json, fetch_bytes, fetch_json};
use crate::upstream::{
    domain::{RealmStatus, TokenPrice, UpstreamError, UpstreamResult},
    ports::GameDataSource,
};

const SOURCE: &str = "battle.net";
const DEFAULT_OAUTH_URL: &str = "https://oauth.battle.net/token";
const DEFAULT_API_BASE: &str = "https://{region}.api.blizzard.com";
/// Tokens are refreshed this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct AccessTokenBody {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenIndexBody {
    price: u64,
    #[serde(default)]
    last_updated_timestamp: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct NamedType {
    #[serde(rename = "type")]
    kind: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RealmRegion {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RealmBody {
    name: String,
    region: RealmRegion,
    category: String,
    timezone: String,
}

#[derive(Debug, Deserialize)]
struct ConnectedRealmBody {
    has_queue: bool,
    status: NamedType,
    population: NamedType,
    realms: Vec<RealmBody>,
}

/// Decodes a token index payload.
///
/// # Errors
///
/// Returns [`UpstreamError::Malformed`] when the price is missing.
pub fn decode_token_price(body: &[u8]) -> UpstreamResult<TokenPrice> {
    let index: TokenIndexBody = decode_json(SOURCE, body)?;
    Ok(TokenPrice {
        copper: index.price,
        last_updated: index
            .last_updated_timestamp
            .and_then(DateTime::<Utc>::from_timestamp_millis),
    })
}

/// Decodes a connected realm payload requested with a single locale.
///
/// Region, category and timezone are taken from the first realm.
///
/// # Errors
///
/// Returns [`UpstreamError::Malformed`] when fields are missing or the
/// group lists no realm.
pub fn decode_connected_realm(body: &[u8]) -> UpstreamResult<RealmStatus> {
    let group: ConnectedRealmBody = decode_json(SOURCE, body)?;
    let first = group
        .realms
        .first()
        .ok_or_else(|| UpstreamError::malformed(SOURCE, "connected realm lists no realms"))?;
    Ok(RealmStatus {
        is_up: group.status.kind.eq_ignore_ascii_case("UP"),
        status: group.status.name,
        population: group.population.name,
        has_queue: group.has_queue,
        region: first.region.name.clone(),
        category: first.category.clone(),
        timezone: first.timezone.clone(),
        realms: group.realms.iter().map(|realm| realm.name.clone()).collect(),
    })
}

/// Game data client using the OAuth client-credentials flow.
///
/// The access token is cached and refreshed shortly before it expires.
#[derive(Debug)]
pub struct BattleNetClient {
    http: Client,
    client_id: String,
    client_secret: String,
    oauth_url: String,
    api_base: String,
    token: Mutex<Option<CachedToken>>,
}

impl BattleNetClient {
    /// Creates a client for the given application credentials.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] when the HTTP client cannot be
    /// built.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        timeout: Duration,
    ) -> UpstreamResult<Self> {
        Ok(Self {
            http: build_client(SOURCE, timeout)?,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            oauth_url: DEFAULT_OAUTH_URL.to_owned(),
            api_base: DEFAULT_API_BASE.to_owned(),
            token: Mutex::new(None),
        })
    }

    /// Overrides the OAuth token endpoint.
    #[must_use]
    pub fn with_oauth_url(mut self, oauth_url: impl Into<String>) -> Self {
        self.oauth_url = oauth_url.into();
        self
    }

    /// Overrides the API base. `{region}` is replaced by the request region.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn api_url(&self, region: &str, path: &str) -> String {
        format!(
            "{}{path}",
            self.api_base.replace("{region}", region).trim_end_matches('/')
        )
    }

    async fn access_token(&self) -> UpstreamResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|token| token.refresh_at > Instant::now()) {
            return Ok(token.value.clone());
        }

        debug!("requesting game data access token");
        let request = self
            .http
            .post(&self.oauth_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials");
        let body: AccessTokenBody = fetch_json(SOURCE, request).await?;
        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(EXPIRY_MARGIN);
        let value = body.access_token;
        *cached = Some(CachedToken {
            value: value.clone(),
            refresh_at: Instant::now() + lifetime,
        });
        Ok(value)
    }

    async fn get(&self, region: &str, locale: &str, path: &str) -> UpstreamResult<Vec<u8>> {
        let token = self.access_token().await?;
        let namespace = format!("dynamic-{region}");
        let request = self
            .http
            .get(self.api_url(region, path))
            .bearer_auth(token)
            .query(&[("namespace", namespace.as_str()), ("locale", locale)]);
        fetch_bytes(SOURCE, request).await
    }
}

#[async_trait]
impl GameDataSource for BattleNetClient {
    async fn token_price(&self, region: &str, locale: &str) -> UpstreamResult<TokenPrice> {
        let body = self.get(region, locale, "/data/wow/token/index").await?;
        decode_token_price(&body)
    }

    async fn connected_realm(
        &self,
        region: &str,
        locale: &str,
        realm_id: u32,
    ) -> UpstreamResult<RealmStatus> {
        let path = format!("/data/wow/connected-realm/{realm_id}");
        let body = self.get(region, locale, &path).await?;
        decode_connected_realm(&body)
    }
}
