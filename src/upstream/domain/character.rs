//! Character profile as reported by the armory source.

use serde::{Deserialize, Serialize};

use crate::readiness::domain::EquipmentSnapshot;

/// Public profile and equipment of one character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Character name.
    pub name: String,
    /// Race name.
    pub race: String,
    /// Class name.
    pub class: String,
    /// Active specialization name.
    pub active_spec: String,
    /// Realm display name.
    pub realm: String,
    /// Region code, for example `us`.
    pub region: String,
    /// Portrait image.
    pub thumbnail_url: String,
    /// Profile page on the armory source.
    pub profile_url: String,
    /// Equipped item level and per-slot enchants.
    pub equipment: EquipmentSnapshot,
}

/// Converts a realm display name into the slug used by character URLs:
/// lower-cased with apostrophes and spaces removed.
#[must_use]
pub fn realm_slug(realm: &str) -> String {
    realm
        .chars()
        .filter(|character| !matches!(character, '\'' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
