//! Then steps for command admission scenarios.

use super::world::{AdmissionWorld, BODY_REPLY};
use eyre::eyre;
use rstest_bdd_macros::then;
use std::sync::atomic::Ordering;

#[then("the last invocation runs the command")]
fn last_invocation_runs(world: &AdmissionWorld) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre!("no invocation recorded"))?;
    if response.content.as_deref() != Some(BODY_REPLY) {
        return Err(eyre!("expected the command body to answer, got {response:?}"));
    }
    Ok(())
}

#[then(r#"the last invocation is denied with "{message}""#)]
fn last_invocation_denied(world: &AdmissionWorld, message: String) -> Result<(), eyre::Report> {
    let response = world
        .last_response
        .as_ref()
        .ok_or_else(|| eyre!("no invocation recorded"))?;
    if !response.ephemeral {
        return Err(eyre!("denials must be ephemeral, got {response:?}"));
    }
    let shown = response
        .embeds
        .iter()
        .flat_map(|embed| embed.fields.iter())
        .any(|field| field.value == message);
    if !shown {
        return Err(eyre!("expected denial \"{message}\", got {response:?}"));
    }
    Ok(())
}

#[then("the command body ran {count:usize} times")]
fn command_body_ran(world: &AdmissionWorld, count: usize) -> Result<(), eyre::Report> {
    let runs = world.runs.load(Ordering::SeqCst);
    if runs != count {
        return Err(eyre!("expected {count} runs, counted {runs}"));
    }
    Ok(())
}
