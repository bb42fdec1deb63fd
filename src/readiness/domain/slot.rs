//! Equipment slots and enchant identifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Slot that is never checked for an enchant.
pub const DEFAULT_EXEMPT_SLOT: &str = "waist";

/// Slots checked for enchants when configuration does not override them.
pub const DEFAULT_EXPECTED_SLOTS: [&str; 9] = [
    "back", "chest", "wrist", "legs", "feet", "finger1", "finger2", "mainhand", "offhand",
];

/// Lower-cased equipment slot name as reported by the armory source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct GearSlot(String);

impl GearSlot {
    /// Creates a slot name, normalizing case and surrounding whitespace.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_ascii_lowercase())
    }

    /// Returns the slot name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the slot name with its first letter upper-cased.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut characters = self.0.chars();
        characters.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(characters).collect()
        })
    }

    /// Returns the default list of checked slots.
    #[must_use]
    pub fn default_expected() -> Vec<Self> {
        DEFAULT_EXPECTED_SLOTS.iter().map(Self::new).collect()
    }
}

impl From<String> for GearSlot {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<GearSlot> for String {
    fn from(value: GearSlot) -> Self {
        value.0
    }
}

impl AsRef<str> for GearSlot {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GearSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an enchantment as reported by the armory source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnchantId(String);

impl EnchantId {
    /// Wraps an enchant identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EnchantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for EnchantId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for EnchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Externally maintained mapping from enchant id to display name.
///
/// The mapping may lag game content, so a missing id is an expected
/// condition rather than a data error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnchantCatalog {
    names: BTreeMap<EnchantId, String>,
}

impl EnchantCatalog {
    /// Creates a catalog from `(id, name)` pairs.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (EnchantId, String)>) -> Self {
        Self {
            names: entries.into_iter().collect(),
        }
    }

    /// Returns the display name for `id`.
    #[must_use]
    pub fn name_of(&self, id: &EnchantId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Returns every id whose display name equals `name`, ignoring case.
    pub fn ids_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a EnchantId> + 'a {
        self.names
            .iter()
            .filter(move |(_, candidate)| candidate.trim().eq_ignore_ascii_case(name.trim()))
            .map(|(id, _)| id)
    }

    /// Returns the number of known enchants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when no enchant is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
