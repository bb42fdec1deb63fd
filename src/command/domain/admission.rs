//! Admission outcomes and rate-limit keys.

use chrono::TimeDelta;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use super::{CommandName, GuildId, RoleId, UserId};

/// Users denied every command. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    users: HashSet<UserId>,
}

impl Blacklist {
    /// Creates a blacklist from a set of users.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            users: users.into_iter().collect(),
        }
    }

    /// Returns `true` when `user` may not run any command.
    #[must_use]
    pub fn is_blacklisted(&self, user: UserId) -> bool {
        self.users.contains(&user)
    }
}

/// Reason an invocation was refused before its handler ran.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdmissionDenial {
    /// The invoking user is blacklisted.
    #[error("user is blacklisted")]
    Blacklisted,

    /// The invoking user holds none of the required roles.
    #[error("user holds none of the required roles")]
    MissingRole {
        /// Roles of which at least one is required.
        required: BTreeSet<RoleId>,
    },

    /// The invocation quota for this command is exhausted.
    #[error("command is on cooldown for {}ms", .retry_after.num_milliseconds())]
    OnCooldown {
        /// Time until the oldest recorded invocation leaves the window.
        retry_after: TimeDelta,
    },
}

/// Result of running the admission checks for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdmissionDecision {
    /// Every check passed; the invocation was recorded against its quota.
    Admitted,
    /// A check failed; the handler must not run.
    Denied(AdmissionDenial),
}

impl AdmissionDecision {
    /// Returns `true` for [`AdmissionDecision::Admitted`].
    #[must_use]
    pub const fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted)
    }
}

/// Key identifying one rate-limit bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateLimitKey {
    /// Command being invoked.
    pub command: CommandName,
    /// Invoking user.
    pub user: UserId,
    /// Guild of the invocation; `None` for direct messages.
    pub guild: Option<GuildId>,
}

impl RateLimitKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(command: CommandName, user: UserId, guild: Option<GuildId>) -> Self {
        Self {
            command,
            user,
            guild,
        }
    }
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The invocation fits the quota and has been recorded.
    Allowed,
    /// The quota is exhausted.
    Denied {
        /// Time until a slot frees up; always positive.
        retry_after: TimeDelta,
    },
}
