//! Tests for the in-memory sliding-window limiter.

use chrono::TimeDelta;
use rstest::{fixture, rstest};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::support::{epoch, name};
use crate::command::{
    adapters::memory::{InMemoryRateLimiter, SWEEP_INTERVAL},
    domain::{CooldownSpec, GuildId, RateDecision, RateLimitKey, UserId},
    ports::RateLimiter,
};

#[fixture]
fn limiter() -> InMemoryRateLimiter {
    InMemoryRateLimiter::new()
}

fn key(command: &str, user: u64, guild: Option<u64>) -> RateLimitKey {
    RateLimitKey::new(name(command), UserId::new(user), guild.map(GuildId::new))
}

fn cooldown(max: u32, seconds: u64) -> CooldownSpec {
    CooldownSpec::new(max, seconds).expect("valid cooldown")
}

#[rstest]
fn second_call_inside_window_waits_for_the_remainder(limiter: InMemoryRateLimiter) {
    let spec = cooldown(1, 10);
    let target = key("hello", 1, Some(9));

    let first = limiter.check_and_record(&target, epoch(), spec);
    let second = limiter.check_and_record(&target, epoch() + TimeDelta::seconds(3), spec);

    assert!(matches!(first, Ok(RateDecision::Allowed)));
    assert!(matches!(
        second,
        Ok(RateDecision::Denied { retry_after }) if retry_after == TimeDelta::seconds(7)
    ));
}

#[rstest]
#[case(TimeDelta::seconds(10))]
#[case(TimeDelta::seconds(11))]
fn call_at_or_after_window_end_is_allowed(limiter: InMemoryRateLimiter, #[case] gap: TimeDelta) {
    let spec = cooldown(1, 10);
    let target = key("hello", 1, None);

    limiter
        .check_and_record(&target, epoch(), spec)
        .expect("limiter available");
    let later = limiter.check_and_record(&target, epoch() + gap, spec);

    assert!(matches!(later, Ok(RateDecision::Allowed)));
    assert_eq!(limiter.recorded(&target).expect("limiter available"), 1);
}

#[rstest]
fn denial_just_before_window_end_is_strictly_positive(limiter: InMemoryRateLimiter) {
    let spec = cooldown(1, 10);
    let target = key("hello", 1, None);
    limiter
        .check_and_record(&target, epoch(), spec)
        .expect("limiter available");

    let almost = epoch() + TimeDelta::seconds(10) - TimeDelta::milliseconds(1);
    let decision = limiter.check_and_record(&target, almost, spec);

    assert!(matches!(
        decision,
        Ok(RateDecision::Denied { retry_after }) if retry_after == TimeDelta::milliseconds(1)
    ));
}

#[rstest]
fn denied_calls_are_not_recorded(limiter: InMemoryRateLimiter) {
    let spec = cooldown(2, 60);
    let target = key("wow", 5, Some(1));
    for offset in 0..5 {
        let _decision = limiter
            .check_and_record(&target, epoch() + TimeDelta::seconds(offset), spec)
            .expect("limiter available");
    }
    assert_eq!(limiter.recorded(&target).expect("limiter available"), 2);
}

#[rstest]
fn window_slides_past_the_oldest_entry(limiter: InMemoryRateLimiter) {
    let spec = cooldown(2, 10);
    let target = key("kat", 3, None);
    let at = |seconds| epoch() + TimeDelta::seconds(seconds);

    let decisions: Vec<_> = [0, 4, 8, 10, 13, 14]
        .into_iter()
        .map(|seconds| {
            limiter
                .check_and_record(&target, at(seconds), spec)
                .expect("limiter available")
        })
        .collect();

    assert_eq!(
        decisions,
        vec![
            RateDecision::Allowed,
            RateDecision::Allowed,
            RateDecision::Denied {
                retry_after: TimeDelta::seconds(2)
            },
            RateDecision::Allowed,
            RateDecision::Denied {
                retry_after: TimeDelta::seconds(1)
            },
            RateDecision::Allowed,
        ]
    );
}

#[rstest]
#[case::other_command(key("jams", 1, Some(9)))]
#[case::other_user(key("hello", 2, Some(9)))]
#[case::other_guild(key("hello", 1, Some(10)))]
#[case::direct_message(key("hello", 1, None))]
fn keys_are_independent(limiter: InMemoryRateLimiter, #[case] other: RateLimitKey) {
    let spec = cooldown(1, 10);
    let exhausted = key("hello", 1, Some(9));
    limiter
        .check_and_record(&exhausted, epoch(), spec)
        .expect("limiter available");

    let blocked = limiter.check_and_record(&exhausted, epoch(), spec);
    let independent = limiter.check_and_record(&other, epoch(), spec);

    assert!(matches!(blocked, Ok(RateDecision::Denied { .. })));
    assert!(matches!(independent, Ok(RateDecision::Allowed)));
}

#[rstest]
fn concurrent_checks_never_exceed_the_quota(limiter: InMemoryRateLimiter) {
    let spec = cooldown(3, 10);
    let target = key("token", 8, Some(1));
    let allowed = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for _ in 0..16 {
            scope.spawn(|| {
                let decision = limiter
                    .check_and_record(&target, epoch(), spec)
                    .expect("limiter available");
                if decision == RateDecision::Allowed {
                    allowed.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
    });

    assert_eq!(allowed.load(Ordering::SeqCst), 3);
    assert_eq!(limiter.recorded(&target).expect("limiter available"), 3);
}

#[rstest]
fn expired_buckets_are_released(limiter: InMemoryRateLimiter) {
    let spec = cooldown(1, 10);
    for user in 0..1_000 {
        limiter
            .check_and_record(&key("hello", user, Some(1)), epoch(), spec)
            .expect("limiter available");
    }
    assert_eq!(limiter.tracked_keys().expect("limiter available"), 1_000);

    let next_day = epoch() + TimeDelta::days(1);
    let active = key("wow", 5_000, Some(1));
    for _ in 0..SWEEP_INTERVAL {
        limiter
            .check_and_record(&active, next_day, spec)
            .expect("limiter available");
    }

    assert_eq!(limiter.tracked_keys().expect("limiter available"), 1);
    assert_eq!(limiter.recorded(&key("hello", 0, Some(1))).expect("limiter available"), 0);
    assert_eq!(limiter.recorded(&active).expect("limiter available"), 1);
}

#[rstest]
fn buckets_inside_their_window_survive_a_sweep(limiter: InMemoryRateLimiter) {
    let long = cooldown(1, 3_600);
    let target = key("jams", 1, None);
    limiter
        .check_and_record(&target, epoch(), long)
        .expect("limiter available");

    let short = cooldown(1, 1);
    let later = epoch() + TimeDelta::minutes(30);
    for user in 0..u64::from(SWEEP_INTERVAL) {
        limiter
            .check_and_record(&key("hello", 100 + user, None), later, short)
            .expect("limiter available");
    }

    let retry = limiter.check_and_record(&target, later, long);
    assert!(matches!(
        retry,
        Ok(RateDecision::Denied { retry_after }) if retry_after == TimeDelta::minutes(30)
    ));
}
