//! Unit tests for readiness evaluation.

use std::sync::Arc;

use crate::readiness::{
    domain::{
        EnchantCatalog, EnchantId, EquipmentSnapshot, EquippedItem, GearSlot, ReadinessRequirement,
        SlotOutcome,
    },
    services::ReadinessEvaluator,
};
use rstest::{fixture, rstest};

#[fixture]
fn catalog() -> EnchantCatalog {
    EnchantCatalog::new([
        (EnchantId::from("x"), "Waking Stats".to_owned()),
        (EnchantId::from("y"), "Sustained Strength".to_owned()),
        (EnchantId::from("z"), "Reserve of Intellect".to_owned()),
        (EnchantId::from("belt"), "Shadowed Belt Clasp".to_owned()),
    ])
}

#[fixture]
fn evaluator(catalog: EnchantCatalog) -> ReadinessEvaluator {
    ReadinessEvaluator::new(
        GearSlot::default_expected(),
        GearSlot::new("waist"),
        Arc::new(catalog),
    )
}

fn chest_requirement(min_item_level: u32) -> ReadinessRequirement {
    ReadinessRequirement::new(min_item_level)
        .accepting("chest", [EnchantId::from("x"), EnchantId::from("y")])
}

#[rstest]
#[case(450, 440, true)]
#[case(440, 440, true)]
#[case(439, 440, false)]
fn level_passes_at_or_above_the_minimum(
    evaluator: ReadinessEvaluator,
    #[case] equipped: u32,
    #[case] required: u32,
    #[case] expected: bool,
) {
    let report = evaluator.evaluate(
        &EquipmentSnapshot::new(equipped),
        &ReadinessRequirement::new(required),
    );
    assert_eq!(report.level.equipped, equipped);
    assert_eq!(report.level.required, required);
    assert_eq!(report.level.passed, expected);
}

#[rstest]
#[case("x", SlotOutcome::Pass { enchant: "Waking Stats".to_owned() })]
#[case("z", SlotOutcome::Fail { enchant: "Reserve of Intellect".to_owned() })]
#[case("unknown", SlotOutcome::UnknownEnchant { enchant_id: EnchantId::from("unknown") })]
fn chest_enchant_is_classified(
    evaluator: ReadinessEvaluator,
    #[case] enchant: &str,
    #[case] expected: SlotOutcome,
) {
    let snapshot = EquipmentSnapshot::new(450).with_item("chest", EquippedItem::enchanted(enchant));
    let report = evaluator.evaluate(&snapshot, &chest_requirement(440));
    assert_eq!(report.outcome_for("chest"), Some(&expected));
}

#[rstest]
fn missing_and_bare_items_are_unenchanted(evaluator: ReadinessEvaluator) {
    let snapshot = EquipmentSnapshot::new(450).with_item("back", EquippedItem::bare());
    let report = evaluator.evaluate(&snapshot, &chest_requirement(440));

    assert_eq!(report.outcome_for("back"), Some(&SlotOutcome::Unenchanted));
    assert_eq!(report.outcome_for("feet"), Some(&SlotOutcome::Unenchanted));
    assert_eq!(report.unenchanted_slots().count(), 9);
}

#[rstest]
fn exempt_slot_is_never_reported(evaluator: ReadinessEvaluator) {
    let bare = evaluator.evaluate(&EquipmentSnapshot::new(450), &chest_requirement(440));
    let enchanted = evaluator.evaluate(
        &EquipmentSnapshot::new(450).with_item("waist", EquippedItem::enchanted("belt")),
        &chest_requirement(440),
    );

    assert_eq!(bare.outcome_for("waist"), None);
    assert_eq!(enchanted.outcome_for("waist"), None);
}

#[rstest]
fn expected_slots_come_first_then_extra_enchanted_slots(evaluator: ReadinessEvaluator) {
    let snapshot = EquipmentSnapshot::new(450)
        .with_item("head", EquippedItem::enchanted("z"))
        .with_item("chest", EquippedItem::enchanted("x"))
        .with_item("neck", EquippedItem::bare());
    let report = evaluator.evaluate(&snapshot, &chest_requirement(440));

    let order: Vec<&str> = report.slots.iter().map(|row| row.slot.as_str()).collect();
    assert_eq!(
        order,
        [
            "back", "chest", "wrist", "legs", "feet", "finger1", "finger2", "mainhand", "offhand",
            "head"
        ]
    );
    assert_eq!(
        report.outcome_for("head"),
        Some(&SlotOutcome::Fail {
            enchant: "Reserve of Intellect".to_owned()
        })
    );
}

#[rstest]
fn evaluation_is_repeatable(evaluator: ReadinessEvaluator) {
    let snapshot = EquipmentSnapshot::new(447)
        .with_item("chest", EquippedItem::enchanted("y"))
        .with_item("back", EquippedItem::enchanted("mystery"));
    let requirement = chest_requirement(446);

    let first = evaluator.evaluate(&snapshot, &requirement);
    let second = evaluator.evaluate(&snapshot, &requirement);
    assert_eq!(first, second);
}

#[rstest]
fn custom_exempt_slot_replaces_the_default(catalog: EnchantCatalog) {
    let evaluator = ReadinessEvaluator::new(
        vec![GearSlot::new("chest"), GearSlot::new("offhand")],
        GearSlot::new("offhand"),
        Arc::new(catalog),
    );
    let report = evaluator.evaluate(&EquipmentSnapshot::new(1), &chest_requirement(1));

    assert_eq!(report.slots.len(), 1);
    assert_eq!(report.outcome_for("offhand"), None);
}
