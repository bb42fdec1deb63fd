//! Tests for the command registry.

use rstest::{fixture, rstest};
use std::sync::Arc;

use super::support::{EchoHandler, name};
use crate::command::{
    domain::{CommandDefinition, CommandParameterSpec},
    services::{CommandDescriptor, CommandRegistry, RegistryError},
};

fn descriptor(command: &str) -> CommandDescriptor {
    CommandDescriptor::new(
        CommandDefinition::slash(name(command), format!("/{command}")),
        Arc::new(EchoHandler("ok")),
    )
}

#[fixture]
fn registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    for command in ["wow", "hello", "jams"] {
        registry.register(descriptor(command)).expect("unique name");
    }
    registry
}

#[rstest]
fn resolve_ignores_case(registry: CommandRegistry) {
    let found = registry.resolve("HeLLo").expect("registered");
    assert_eq!(found.name().as_str(), "hello");
}

#[rstest]
#[case("nope")]
#[case("not a/name")]
fn unknown_names_are_reported(registry: CommandRegistry, #[case] input: &str) {
    assert!(matches!(
        registry.resolve(input),
        Err(RegistryError::UnknownCommand(name)) if name == input
    ));
}

#[rstest]
fn duplicate_names_are_rejected(mut registry: CommandRegistry) {
    let result = registry.register(descriptor("WOW"));
    assert_eq!(result, Err(RegistryError::DuplicateName(name("wow"))));
    assert_eq!(registry.len(), 3);
}

#[rstest]
fn invalid_schema_is_rejected(mut registry: CommandRegistry) {
    let definition = CommandDefinition::slash(name("status"), "Realm status")
        .with_parameter(CommandParameterSpec::required("realm"))
        .with_parameter(CommandParameterSpec::optional("Realm"));
    let result = registry.register(CommandDescriptor::new(definition, Arc::new(EchoHandler("ok"))));

    assert!(matches!(result, Err(RegistryError::InvalidDefinition(_))));
    assert!(registry.resolve("status").is_err());
}

#[rstest]
fn listing_is_in_registration_order_and_restartable(registry: CommandRegistry) {
    let first: Vec<_> = registry.list_all().map(|entry| entry.name().to_string()).collect();
    let second: Vec<_> = registry.list_all().map(|entry| entry.name().to_string()).collect();

    assert_eq!(first, ["wow", "hello", "jams"]);
    assert_eq!(first, second);
}

#[rstest]
fn empty_registry_lists_nothing() {
    let registry = CommandRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.list_all().count(), 0);
}
