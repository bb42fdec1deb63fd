//! Behaviour tests for command admission.

#[path = "admission_steps/mod.rs"]
mod admission_steps_defs;

use admission_steps_defs::world::{AdmissionWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/admission.feature",
    name = "Invocations within the quota run the command"
)]
#[tokio::test(flavor = "multi_thread")]
async fn invocations_within_quota_run(world: AdmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/admission.feature",
    name = "Exceeding the quota puts the command on cooldown"
)]
#[tokio::test(flavor = "multi_thread")]
async fn exceeding_quota_puts_command_on_cooldown(world: AdmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/admission.feature",
    name = "The cooldown lifts once the window has passed"
)]
#[tokio::test(flavor = "multi_thread")]
async fn cooldown_lifts_after_window(world: AdmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/admission.feature",
    name = "Cooldowns are tracked per user"
)]
#[tokio::test(flavor = "multi_thread")]
async fn cooldowns_are_per_user(world: AdmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/admission.feature",
    name = "Blacklisted users are refused before anything else"
)]
#[tokio::test(flavor = "multi_thread")]
async fn blacklisted_users_are_refused(world: AdmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/admission.feature",
    name = "Role-gated commands refuse users without the role"
)]
#[tokio::test(flavor = "multi_thread")]
async fn role_gate_refuses_users_without_role(world: AdmissionWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/admission.feature",
    name = "Holding the role admits the user"
)]
#[tokio::test(flavor = "multi_thread")]
async fn holding_role_admits_user(world: AdmissionWorld) {
    let _ = world;
}
