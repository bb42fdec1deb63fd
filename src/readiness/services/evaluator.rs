//! Readiness evaluation.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::readiness::domain::{
    EnchantCatalog, EquipmentSnapshot, GearSlot, LevelOutcome, ReadinessReport,
    ReadinessRequirement, SlotOutcome, SlotReport,
};

/// Checks an equipment snapshot against a requirement.
///
/// Evaluation is pure: the same snapshot and requirement always yield the
/// same report.
#[derive(Debug, Clone)]
pub struct ReadinessEvaluator {
    expected_slots: Vec<GearSlot>,
    exempt_slot: GearSlot,
    catalog: Arc<EnchantCatalog>,
}

impl ReadinessEvaluator {
    /// Creates an evaluator for the given checked slots, exempt slot and
    /// enchant catalog.
    #[must_use]
    pub const fn new(
        expected_slots: Vec<GearSlot>,
        exempt_slot: GearSlot,
        catalog: Arc<EnchantCatalog>,
    ) -> Self {
        Self {
            expected_slots,
            exempt_slot,
            catalog,
        }
    }

    /// Returns the slots every character is expected to enchant.
    #[must_use]
    pub fn expected_slots(&self) -> &[GearSlot] {
        &self.expected_slots
    }

    /// Returns the enchant catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Arc<EnchantCatalog> {
        &self.catalog
    }

    /// Produces the per-slot and item level breakdown.
    ///
    /// Expected slots are reported in configuration order, followed by any
    /// other enchanted slot in name order. The exempt slot is never
    /// reported.
    #[must_use]
    pub fn evaluate(
        &self,
        snapshot: &EquipmentSnapshot,
        requirement: &ReadinessRequirement,
    ) -> ReadinessReport {
        let expected: BTreeSet<&GearSlot> = self.expected_slots.iter().collect();
        let extra = snapshot
            .enchanted_slots()
            .filter(|slot| !expected.contains(slot));

        let slots = self
            .expected_slots
            .iter()
            .chain(extra)
            .filter(|slot| **slot != self.exempt_slot)
            .map(|slot| SlotReport {
                slot: slot.clone(),
                outcome: self.slot_outcome(snapshot, requirement, slot),
            })
            .collect();

        let equipped = snapshot.item_level_equipped;
        let required = requirement.min_item_level();
        ReadinessReport {
            level: LevelOutcome {
                equipped,
                required,
                passed: equipped >= required,
            },
            slots,
        }
    }

    fn slot_outcome(
        &self,
        snapshot: &EquipmentSnapshot,
        requirement: &ReadinessRequirement,
        slot: &GearSlot,
    ) -> SlotOutcome {
        let Some(enchant_id) = snapshot.enchant_in(slot) else {
            return SlotOutcome::Unenchanted;
        };
        let Some(name) = self.catalog.name_of(enchant_id) else {
            return SlotOutcome::UnknownEnchant {
                enchant_id: enchant_id.clone(),
            };
        };
        let enchant = name.to_owned();
        if requirement.accepts(slot, enchant_id) {
            SlotOutcome::Pass { enchant }
        } else {
            SlotOutcome::Fail { enchant }
        }
    }
}
