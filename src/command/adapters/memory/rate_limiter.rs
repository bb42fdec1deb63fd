//! In-memory sliding-window rate limiter.

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::command::{
    domain::{CooldownSpec, RateDecision, RateLimitKey},
    ports::{RateLimitError, RateLimitResult, RateLimiter},
};

/// Checks between sweeps of buckets whose every entry has expired.
pub const SWEEP_INTERVAL: u32 = 256;

#[derive(Debug)]
struct Bucket {
    window: TimeDelta,
    timestamps: VecDeque<DateTime<Utc>>,
}

impl Bucket {
    const fn new(window: TimeDelta) -> Self {
        Self {
            window,
            timestamps: VecDeque::new(),
        }
    }

    /// Drops entries at or before `now - window`.
    fn prune(&mut self, now: DateTime<Utc>) {
        if let Some(cutoff) = now.checked_sub_signed(self.window) {
            while self.timestamps.front().is_some_and(|oldest| *oldest <= cutoff) {
                self.timestamps.pop_front();
            }
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.timestamps.back().is_none_or(|newest| {
            now.checked_sub_signed(self.window)
                .is_some_and(|cutoff| *newest <= cutoff)
        })
    }
}

#[derive(Debug, Default)]
struct Buckets {
    entries: HashMap<RateLimitKey, Bucket>,
    checks_since_sweep: u32,
}

impl Buckets {
    fn sweep_if_due(&mut self, now: DateTime<Utc>) {
        self.checks_since_sweep = self.checks_since_sweep.saturating_add(1);
        if self.checks_since_sweep < SWEEP_INTERVAL {
            return;
        }
        self.checks_since_sweep = 0;
        self.entries.retain(|_, bucket| !bucket.is_expired(now));
    }
}

/// Process-wide sliding-window rate limiter.
///
/// All buckets sit behind a single mutex, so every check-and-record is
/// atomic across keys. Buckets whose entries have all left their window are
/// released every [`SWEEP_INTERVAL`] checks. State is not persisted;
/// cooldowns reset on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRateLimiter {
    state: Arc<Mutex<Buckets>>,
}

impl InMemoryRateLimiter {
    /// Creates an empty limiter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RateLimitResult<MutexGuard<'_, Buckets>> {
        self.state
            .lock()
            .map_err(|err| RateLimitError::unavailable(std::io::Error::other(err.to_string())))
    }

    /// Returns how many invocations are currently recorded for `key`,
    /// including ones that have left their window but not yet been swept.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError`] when the state lock is poisoned.
    pub fn recorded(&self, key: &RateLimitKey) -> RateLimitResult<usize> {
        let state = self.lock()?;
        Ok(state
            .entries
            .get(key)
            .map_or(0, |bucket| bucket.timestamps.len()))
    }

    /// Returns the number of keys holding a bucket.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError`] when the state lock is poisoned.
    pub fn tracked_keys(&self) -> RateLimitResult<usize> {
        Ok(self.lock()?.entries.len())
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check_and_record(
        &self,
        key: &RateLimitKey,
        now: DateTime<Utc>,
        spec: CooldownSpec,
    ) -> RateLimitResult<RateDecision> {
        let mut state = self.lock()?;
        state.sweep_if_due(now);

        let bucket = state
            .entries
            .entry(key.clone())
            .or_insert_with(|| Bucket::new(spec.window()));
        // The latest spec wins if a command's cooldown changed.
        bucket.window = spec.window();
        bucket.prune(now);

        let capacity = usize::try_from(spec.max_invocations()).unwrap_or(usize::MAX);
        if bucket.timestamps.len() < capacity {
            bucket.timestamps.push_back(now);
            return Ok(RateDecision::Allowed);
        }

        let retry_after = bucket.timestamps.front().map_or(spec.window(), |oldest| {
            (spec.window() - (now - *oldest)).min(spec.window())
        });
        Ok(RateDecision::Denied { retry_after })
    }
}
