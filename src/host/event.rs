//! Wire shapes of the line-delimited JSON host.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::command::{
    domain::{
        ChannelId, CommandDomainError, CommandResponse, GuildId, MemberTarget, ParsedInvocation,
        RoleId, UserId,
    },
    services::InvocationRequest,
};

/// Reasons an event line cannot become an invocation.
#[derive(Debug, Error)]
pub enum EventError {
    /// The line is not a valid event object.
    #[error("malformed event: {0}")]
    Json(#[from] serde_json::Error),

    /// The `input` text could not be parsed.
    #[error(transparent)]
    Input(#[from] CommandDomainError),

    /// Neither `input` nor `command` was supplied.
    #[error("event names no command; set `input` or `command`")]
    MissingCommand,
}

/// One command event.
///
/// Text hosts send `input` (`/jams search="lofi beats"`); hosts with native
/// command UIs send `command` and `arguments` directly, which is the only
/// way to reach context-menu entries such as `Show Member Info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostEvent {
    /// Correlation id echoed on the reply.
    #[serde(default)]
    pub id: Option<String>,
    /// Raw `/command key=value` text.
    #[serde(default)]
    pub input: Option<String>,
    /// Command name or context-menu label, used when `input` is absent.
    #[serde(default)]
    pub command: Option<String>,
    /// Raw arguments, merged under any parsed from `input`.
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
    /// Invoking user.
    pub user_id: UserId,
    /// Invoking user's display name.
    #[serde(default)]
    pub display_name: String,
    /// Channel of the invocation.
    pub channel_id: ChannelId,
    /// Guild of the invocation.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// Roles the invoking user holds.
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Member targeted by a context-menu command.
    #[serde(default)]
    pub target: Option<MemberTarget>,
}

impl HostEvent {
    /// Parses one line.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Json`] when the line is not an event.
    pub fn from_line(line: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Converts the event into a dispatcher request. Arguments parsed from
    /// `input` win over explicit ones with the same name.
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] when `input` is malformed or no command is
    /// named.
    pub fn into_request(self) -> Result<InvocationRequest, EventError> {
        let (command, arguments) = match (self.input, self.command) {
            (Some(input), _) => {
                let (command, parsed) = ParsedInvocation::parse(&input)?.into_parts();
                let mut merged = self.arguments;
                merged.extend(parsed);
                (command, merged)
            }
            (None, Some(command)) => (command, self.arguments),
            (None, None) => return Err(EventError::MissingCommand),
        };
        Ok(InvocationRequest {
            command,
            arguments,
            user_id: self.user_id,
            display_name: self.display_name,
            channel_id: self.channel_id,
            guild_id: self.guild_id,
            roles: self.roles,
            target: self.target,
        })
    }
}

/// Reply line for one event: either a response or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostReply {
    /// Correlation id copied from the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Response to deliver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<CommandResponse>,
    /// Why no response was produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HostReply {
    /// Wraps a response.
    #[must_use]
    pub const fn response(id: Option<String>, response: CommandResponse) -> Self {
        Self {
            id,
            response: Some(response),
            error: None,
        }
    }

    /// Wraps a failure message.
    #[must_use]
    pub const fn error(id: Option<String>, message: String) -> Self {
        Self {
            id,
            response: None,
            error: Some(message),
        }
    }
}
