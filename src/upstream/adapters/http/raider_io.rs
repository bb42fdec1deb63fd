//! Raider.io character profile adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Number;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::warn;

use super::client::{build_client, decode_json, fetch_response};
use crate::readiness::domain::{EnchantId, EquipmentSnapshot, EquippedItem};
use crate::upstream::{
    domain::{CharacterProfile, UpstreamError, UpstreamResult},
    ports::CharacterSource,
};

const SOURCE: &str = "raider.io";
const DEFAULT_BASE_URL: &str = "https://raider.io";
const UNKNOWN_CHARACTER: &str = "could not find requested character";

#[derive(Debug, Deserialize)]
struct ItemBody {
    #[serde(default)]
    enchant: Option<Number>,
}

#[derive(Debug, Deserialize)]
struct GearBody {
    item_level_equipped: Number,
    #[serde(default)]
    items: BTreeMap<String, ItemBody>,
}

#[derive(Debug, Deserialize)]
struct ProfileBody {
    name: String,
    race: String,
    class: String,
    active_spec_name: String,
    region: String,
    realm: String,
    thumbnail_url: String,
    profile_url: String,
    gear: GearBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Drops the fractional part of a reported item level.
fn whole_level(level: &Number) -> Option<u32> {
    level
        .as_u64()
        .and_then(|whole| u32::try_from(whole).ok())
        .or_else(|| level.to_string().split('.').next()?.parse().ok())
}

/// Decodes a profile payload requested with `fields=gear`.
///
/// # Errors
///
/// Returns [`UpstreamError::Malformed`] when required fields are missing or
/// the item level is not a non-negative number.
pub fn decode_profile(body: &[u8]) -> UpstreamResult<CharacterProfile> {
    let profile: ProfileBody = decode_json(SOURCE, body)?;
    let level = whole_level(&profile.gear.item_level_equipped).ok_or_else(|| {
        UpstreamError::malformed(
            SOURCE,
            format!("item level {} is invalid", profile.gear.item_level_equipped),
        )
    })?;

    let equipment = profile
        .gear
        .items
        .iter()
        .fold(EquipmentSnapshot::new(level), |snapshot, (slot, item)| {
            let equipped = item.enchant.as_ref().map_or_else(EquippedItem::bare, |enchant| {
                EquippedItem::enchanted(EnchantId::new(enchant.to_string()))
            });
            snapshot.with_item(slot, equipped)
        });

    Ok(CharacterProfile {
        name: profile.name,
        race: profile.race,
        class: profile.class,
        active_spec: profile.active_spec_name,
        realm: profile.realm,
        region: profile.region,
        thumbnail_url: profile.thumbnail_url,
        profile_url: profile.profile_url,
        equipment,
    })
}

/// Classifies a non-success profile response.
///
/// The API answers an unknown character with `400` and a message naming
/// it; that and a plain `404` become [`UpstreamError::NotFound`]. Every
/// other status is [`UpstreamError::Unavailable`].
#[must_use]
pub fn classify_failure(status: u16, body: &[u8]) -> UpstreamError {
    let unknown_character = match status {
        404 => true,
        400 => serde_json::from_slice::<ErrorBody>(body).is_ok_and(|error| {
            error.message.to_ascii_lowercase().contains(UNKNOWN_CHARACTER)
        }),
        _ => false,
    };
    if unknown_character {
        UpstreamError::NotFound {
            source_name: SOURCE,
        }
    } else {
        warn!(source = SOURCE, status, "upstream returned an error status");
        UpstreamError::Unavailable {
            source_name: SOURCE,
            status,
        }
    }
}

/// Character source backed by the raider.io public API.
#[derive(Debug, Clone)]
pub struct RaiderIoClient {
    http: Client,
    base_url: String,
}

impl RaiderIoClient {
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
impl CharacterSource for RaiderIoClient {
    async fn character_profile(
        &self,
        region: &str,
        realm_slug: &str,
        name: &str,
    ) -> UpstreamResult<CharacterProfile> {
        let url = format!(
            "{}/api/v1/characters/profile",
            self.base_url.trim_end_matches('/')
        );
        let request = self.http.get(url).query(&[
            ("region", region),
            ("realm", realm_slug),
            ("name", name),
            ("fields", "gear"),
        ]);
        let (status, body) = fetch_response(SOURCE, request).await?;
        if !status.is_success() {
            return Err(classify_failure(status.as_u16(), &body));
        }
        decode_profile(&body)
    }
}
