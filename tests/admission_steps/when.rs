//! When steps for command admission scenarios.

use super::world::{AdmissionWorld, run_async};
use beymax::command::{
    domain::{ChannelId, GuildId, RoleId, UserId},
    services::InvocationRequest,
};
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use std::collections::BTreeMap;

fn invoke(
    world: &mut AdmissionWorld,
    user: u64,
    roles: Vec<RoleId>,
    command: String,
) -> eyre::Result<()> {
    let request = InvocationRequest {
        command,
        arguments: BTreeMap::new(),
        user_id: UserId::new(user),
        display_name: format!("user-{user}"),
        channel_id: ChannelId::new(30),
        guild_id: Some(GuildId::new(40)),
        roles,
        target: None,
    };
    let dispatcher = world.dispatcher()?;
    let response = run_async(dispatcher.dispatch(request)).wrap_err("dispatch scenario command")?;
    world.last_response = Some(response);
    Ok(())
}

#[when(r#"user {user:u64} invokes "{command}""#)]
fn user_invokes(
    world: &mut AdmissionWorld,
    user: u64,
    command: String,
) -> Result<(), eyre::Report> {
    invoke(world, user, Vec::new(), command)
}

#[when(r#"user {user:u64} holding role {role:u64} invokes "{command}""#)]
fn user_with_role_invokes(
    world: &mut AdmissionWorld,
    user: u64,
    role: u64,
    command: String,
) -> Result<(), eyre::Report> {
    invoke(world, user, vec![RoleId::new(role)], command)
}

#[when("{seconds:i64} seconds pass")]
fn seconds_pass(world: &mut AdmissionWorld, seconds: i64) -> Result<(), eyre::Report> {
    world.clock.advance(TimeDelta::seconds(seconds))
}
