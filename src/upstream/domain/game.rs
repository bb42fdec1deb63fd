//! Game data: token price and realm status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Copper per gold coin.
const COPPER_PER_GOLD: u64 = 10_000;

/// Current price of the in-game token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPrice {
    /// Price in copper.
    pub copper: u64,
    /// When the price was last updated, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl TokenPrice {
    /// Creates a price from a copper amount.
    #[must_use]
    pub const fn from_copper(copper: u64) -> Self {
        Self {
            copper,
            last_updated: None,
        }
    }

    /// Returns the price in whole gold, rounding down.
    #[must_use]
    pub const fn gold(&self) -> u64 {
        self.copper.div_euclid(COPPER_PER_GOLD)
    }

    /// Returns the gold price with comma thousands separators.
    #[must_use]
    pub fn formatted_gold(&self) -> String {
        group_thousands(self.gold())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len().div_euclid(3));
    let lead = digits.len().rem_euclid(3);
    for (position, digit) in digits.chars().enumerate() {
        if position != 0 && position.rem_euclid(3) == lead {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// State of a connected realm group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmStatus {
    /// Status name as reported, for example `Up` or `Down`.
    pub status: String,
    /// Whether the realms are online.
    pub is_up: bool,
    /// Population label, for example `High`.
    pub population: String,
    /// Whether a login queue is active.
    pub has_queue: bool,
    /// Region name.
    pub region: String,
    /// Realm category, for example `United States`.
    pub category: String,
    /// Realm timezone.
    pub timezone: String,
    /// Names of the connected realms.
    pub realms: Vec<String>,
}
