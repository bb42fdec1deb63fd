//! Readiness report: per-slot outcomes plus the item level outcome.

use serde::{Deserialize, Serialize};

use super::{EnchantId, GearSlot};

/// Outcome of checking one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SlotOutcome {
    /// The slot carries an accepted enchant.
    Pass {
        /// Display name of the enchant.
        enchant: String,
    },
    /// The slot carries a known enchant that is not accepted.
    Fail {
        /// Display name of the enchant.
        enchant: String,
    },
    /// The slot is expected to be enchanted but is not.
    Unenchanted,
    /// The enchant id is absent from the catalog; check manually.
    UnknownEnchant {
        /// Unrecognized enchant id.
        enchant_id: EnchantId,
    },
}

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotReport {
    /// Checked slot.
    pub slot: GearSlot,
    /// Result for the slot.
    pub outcome: SlotOutcome,
}

/// Equipped item level compared to the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOutcome {
    /// Equipped item level.
    pub equipped: u32,
    /// Required minimum.
    pub required: u32,
    /// Whether `equipped >= required`.
    pub passed: bool,
}

/// Full breakdown of a readiness evaluation.
///
/// There is deliberately no overall verdict: the accepted-enchant list is
/// community maintained and may be incomplete, so viewers judge readiness
/// from the individual rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// Item level outcome.
    pub level: LevelOutcome,
    /// Slot outcomes, expected slots first.
    pub slots: Vec<SlotReport>,
}

impl ReadinessReport {
    /// Returns the outcome for `slot`, if it was checked.
    #[must_use]
    pub fn outcome_for(&self, slot: &str) -> Option<&SlotOutcome> {
        let wanted = GearSlot::new(slot);
        self.slots
            .iter()
            .find(|row| row.slot == wanted)
            .map(|row| &row.outcome)
    }

    /// Iterates slots reported as [`SlotOutcome::Unenchanted`].
    pub fn unenchanted_slots(&self) -> impl Iterator<Item = &GearSlot> + '_ {
        self.slots
            .iter()
            .filter(|row| row.outcome == SlotOutcome::Unenchanted)
            .map(|row| &row.slot)
    }
}
