//! Pass criteria for raid readiness.

use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use super::{EnchantCatalog, EnchantId, GearSlot, ReadinessError};

/// Zero-based column holding accepted enchant names in the requirement
/// table (column I).
pub const ACCEPTED_ENCHANT_COLUMN: usize = 8;

/// Minimum item level plus the enchants accepted in each slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadinessRequirement {
    min_item_level: u32,
    accepted: BTreeMap<GearSlot, BTreeSet<EnchantId>>,
}

impl ReadinessRequirement {
    /// Creates a requirement with no accepted enchants.
    #[must_use]
    pub const fn new(min_item_level: u32) -> Self {
        Self {
            min_item_level,
            accepted: BTreeMap::new(),
        }
    }

    /// Accepts `enchants` in `slot`.
    #[must_use]
    pub fn accepting(
        mut self,
        slot: impl AsRef<str>,
        enchants: impl IntoIterator<Item = EnchantId>,
    ) -> Self {
        self.accepted
            .entry(GearSlot::new(slot))
            .or_default()
            .extend(enchants);
        self
    }

    /// Reads a requirement from spreadsheet rows.
    ///
    /// Cell A1 holds the minimum item level. Column I, from the second row
    /// on, lists accepted enchant names; each name is translated to every
    /// catalog id carrying it and accepted in all `slots`. Names missing
    /// from the catalog are logged and skipped. Rows are addressed by
    /// position, so reordering the sheet silently changes the result.
    ///
    /// # Errors
    ///
    /// Returns [`ReadinessError`] when the level cell is missing or not a
    /// whole number.
    pub fn from_table(
        rows: &[Vec<String>],
        catalog: &EnchantCatalog,
        slots: &[GearSlot],
    ) -> Result<Self, ReadinessError> {
        let level_cell = rows
            .first()
            .and_then(|row| row.first())
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .ok_or(ReadinessError::MissingMinimumLevel)?;
        let min_item_level = level_cell
            .parse::<u32>()
            .map_err(|_| ReadinessError::InvalidMinimumLevel(level_cell.to_owned()))?;

        let mut accepted_ids = BTreeSet::new();
        for name in rows
            .iter()
            .skip(1)
            .filter_map(|row| row.get(ACCEPTED_ENCHANT_COLUMN))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
        {
            let before = accepted_ids.len();
            accepted_ids.extend(catalog.ids_named(name).cloned());
            if accepted_ids.len() == before {
                warn!(enchant = name, "accepted enchant is not in the enchant catalog");
            }
        }

        Ok(slots.iter().fold(Self::new(min_item_level), |requirement, slot| {
            requirement.accepting(slot, accepted_ids.iter().cloned())
        }))
    }

    /// Returns the minimum equipped item level.
    #[must_use]
    pub const fn min_item_level(&self) -> u32 {
        self.min_item_level
    }

    /// Returns `true` when `enchant` is accepted in `slot`.
    #[must_use]
    pub fn accepts(&self, slot: &GearSlot, enchant: &EnchantId) -> bool {
        self.accepted
            .get(slot)
            .is_some_and(|enchants| enchants.contains(enchant))
    }
}
