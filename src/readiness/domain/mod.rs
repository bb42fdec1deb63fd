//! Domain model for character raid readiness.

mod error;
mod report;
mod requirement;
mod slot;
mod snapshot;

pub use error::ReadinessError;
pub use report::{LevelOutcome, ReadinessReport, SlotOutcome, SlotReport};
pub use requirement::{ACCEPTED_ENCHANT_COLUMN, ReadinessRequirement};
pub use slot::{
    DEFAULT_EXEMPT_SLOT, DEFAULT_EXPECTED_SLOTS, EnchantCatalog, EnchantId, GearSlot,
};
pub use snapshot::{EquipmentSnapshot, EquippedItem};
