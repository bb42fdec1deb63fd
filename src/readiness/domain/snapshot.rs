//! Equipment snapshot of one character.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EnchantId, GearSlot};

/// Item equipped in one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    /// Enchant applied to the item, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enchant: Option<EnchantId>,
}

impl EquippedItem {
    /// Creates an item without an enchant.
    #[must_use]
    pub const fn bare() -> Self {
        Self { enchant: None }
    }

    /// Creates an item carrying `enchant`.
    #[must_use]
    pub fn enchanted(enchant: impl Into<EnchantId>) -> Self {
        Self {
            enchant: Some(enchant.into()),
        }
    }
}

/// Equipped item level and per-slot items as reported by the armory.
///
/// Read-only input to the evaluator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentSnapshot {
    /// Average equipped item level.
    pub item_level_equipped: u32,
    /// Items keyed by slot.
    #[serde(default)]
    pub items: BTreeMap<GearSlot, EquippedItem>,
}

impl EquipmentSnapshot {
    /// Creates a snapshot with no items.
    #[must_use]
    pub const fn new(item_level_equipped: u32) -> Self {
        Self {
            item_level_equipped,
            items: BTreeMap::new(),
        }
    }

    /// Adds an item in `slot`.
    #[must_use]
    pub fn with_item(mut self, slot: impl AsRef<str>, item: EquippedItem) -> Self {
        self.items.insert(GearSlot::new(slot), item);
        self
    }

    /// Returns the enchant in `slot`, if the slot holds an enchanted item.
    #[must_use]
    pub fn enchant_in(&self, slot: &GearSlot) -> Option<&EnchantId> {
        self.items.get(slot).and_then(|item| item.enchant.as_ref())
    }

    /// Iterates slots whose item carries an enchant.
    pub fn enchanted_slots(&self) -> impl Iterator<Item = &GearSlot> + '_ {
        self.items
            .iter()
            .filter(|(_, item)| item.enchant.is_some())
            .map(|(slot, _)| slot)
    }
}
