//! Per-invocation request state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use super::{ChannelId, GuildId, InvocationId, RoleId, UserId};

/// Identity and timing of one incoming command invocation.
///
/// Created fresh for every invocation and discarded once the response is
/// produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    invocation_id: InvocationId,
    user_id: UserId,
    display_name: String,
    channel_id: ChannelId,
    guild_id: Option<GuildId>,
    user_roles: BTreeSet<RoleId>,
    timestamp: DateTime<Utc>,
}

impl InvocationContext {
    /// Creates a context for a user invoking a command in a channel.
    #[must_use]
    pub fn new(user_id: UserId, channel_id: ChannelId, timestamp: DateTime<Utc>) -> Self {
        Self {
            invocation_id: InvocationId::new(),
            user_id,
            display_name: String::new(),
            channel_id,
            guild_id: None,
            user_roles: BTreeSet::new(),
            timestamp,
        }
    }

    /// Sets the guild the invocation happened in.
    #[must_use]
    pub const fn in_guild(mut self, guild_id: GuildId) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    /// Sets the roles held by the invoking user at receipt time.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.user_roles = roles.into_iter().collect();
        self
    }

    /// Sets the invoking user's display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Returns the correlation identifier.
    #[must_use]
    pub const fn invocation_id(&self) -> InvocationId {
        self.invocation_id
    }

    /// Returns the invoking user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the invoking user's display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the channel.
    #[must_use]
    pub const fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Returns the guild, or `None` for direct messages.
    #[must_use]
    pub const fn guild_id(&self) -> Option<GuildId> {
        self.guild_id
    }

    /// Returns the roles held by the invoking user.
    #[must_use]
    pub const fn user_roles(&self) -> &BTreeSet<RoleId> {
        &self.user_roles
    }

    /// Returns the time the invocation was received.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Guild member a context-menu command was invoked on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTarget {
    /// Member's user id.
    pub user_id: UserId,
    /// Member's display name in the guild.
    pub display_name: String,
    /// When the member joined the guild.
    pub joined_at: DateTime<Utc>,
    /// Role ids held by the member, excluding the implicit everyone role.
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Avatar URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Display colour of the member's highest coloured role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
}

/// A validated invocation handed to a command handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    context: InvocationContext,
    arguments: BTreeMap<String, Value>,
    target: Option<MemberTarget>,
}

impl Invocation {
    /// Creates an invocation from a context and typed arguments.
    #[must_use]
    pub const fn new(context: InvocationContext, arguments: BTreeMap<String, Value>) -> Self {
        Self {
            context,
            arguments,
            target: None,
        }
    }

    /// Attaches the context-menu target member.
    #[must_use]
    pub fn with_target(mut self, target: Option<MemberTarget>) -> Self {
        self.target = target;
        self
    }

    /// Returns the invocation context.
    #[must_use]
    pub const fn context(&self) -> &InvocationContext {
        &self.context
    }

    /// Returns all typed arguments.
    #[must_use]
    pub const fn arguments(&self) -> &BTreeMap<String, Value> {
        &self.arguments
    }

    /// Returns a string argument, or `None` when absent or not a string.
    #[must_use]
    pub fn str_argument(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).and_then(Value::as_str)
    }

    /// Returns the context-menu target, if any.
    #[must_use]
    pub const fn target(&self) -> Option<&MemberTarget> {
        self.target.as_ref()
    }
}
