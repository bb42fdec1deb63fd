//! Given steps for command admission scenarios.

use super::world::AdmissionWorld;
use beymax::command::domain::{
    CommandDefinition, CommandName, CooldownSpec, RoleId, UserId,
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a command "{name}" limited to {max:u32} invocations per {window:u64} seconds"#)]
fn cooled_command(
    world: &mut AdmissionWorld,
    name: String,
    max: u32,
    window: u64,
) -> Result<(), eyre::Report> {
    let cooldown = CooldownSpec::new(max, window).wrap_err("scenario cooldown")?;
    let command = CommandName::new(name).wrap_err("scenario command name")?;
    world
        .definitions
        .push(CommandDefinition::slash(command, "Scenario command").with_cooldown(cooldown));
    Ok(())
}

#[given(r#"a command "{name}" restricted to role {role:u64}"#)]
fn role_gated_command(
    world: &mut AdmissionWorld,
    name: String,
    role: u64,
) -> Result<(), eyre::Report> {
    let command = CommandName::new(name).wrap_err("scenario command name")?;
    world.definitions.push(
        CommandDefinition::slash(command, "Scenario command")
            .with_required_roles([RoleId::new(role)]),
    );
    Ok(())
}

#[given("user {user:u64} is blacklisted")]
fn user_is_blacklisted(world: &mut AdmissionWorld, user: u64) {
    world.blacklist.push(UserId::new(user));
}
