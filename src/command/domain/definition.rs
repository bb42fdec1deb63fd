//! Command metadata: names, kinds, cooldowns and role restrictions.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::{
    CommandDomainError, CommandParameterSpec, RoleId, validate_parameter_definitions,
};

/// Maximum length accepted by the chat platform for command names.
const MAX_COMMAND_NAME_LENGTH: usize = 32;

/// Validated, case-normalized command name.
///
/// Slash-command names are lower-case identifiers; context-menu names may
/// also contain spaces. Lookups are case-insensitive because the name is
/// stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandName(String);

impl CommandName {
    /// Creates a validated command name.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidCommandName`] when the trimmed
    /// name is empty, longer than 32 characters, or contains characters
    /// other than ASCII alphanumerics, `-`, `_` and inner spaces.
    pub fn new(value: impl Into<String>) -> Result<Self, CommandDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.chars().count() <= MAX_COMMAND_NAME_LENGTH
            && trimmed.chars().all(|character| {
                character.is_ascii_alphanumeric() || matches!(character, '-' | '_' | ' ')
            });
        if !valid {
            return Err(CommandDomainError::InvalidCommandName(raw));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Returns the normalized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommandName {
    type Error = CommandDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommandName> for String {
    fn from(value: CommandName) -> Self {
        value.0
    }
}

impl AsRef<str> for CommandName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the host surfaces a command to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Typed `/name` command.
    Slash,
    /// Action shown in the context menu of a guild member.
    UserContextMenu,
}

/// Sliding-window invocation cap for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownSpec {
    max_invocations: u32,
    window: TimeDelta,
}

impl CooldownSpec {
    /// Creates a cooldown allowing `max_invocations` per `window_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidCooldown`] when either value is
    /// zero or the window does not fit a [`TimeDelta`].
    pub fn new(max_invocations: u32, window_seconds: u64) -> Result<Self, CommandDomainError> {
        let invalid = CommandDomainError::InvalidCooldown {
            max_invocations,
            window_seconds,
        };
        if max_invocations == 0 || window_seconds == 0 {
            return Err(invalid);
        }
        let seconds = i64::try_from(window_seconds).map_err(|_| invalid.clone())?;
        let window = TimeDelta::try_seconds(seconds).ok_or(invalid)?;
        Ok(Self {
            max_invocations,
            window,
        })
    }

    /// Returns the number of invocations allowed inside one window.
    #[must_use]
    pub const fn max_invocations(self) -> u32 {
        self.max_invocations
    }

    /// Returns the window length.
    #[must_use]
    pub const fn window(self) -> TimeDelta {
        self.window
    }
}

/// Metadata describing one invocable command.
///
/// The definition carries everything the admission pipeline and argument
/// validation need; the handler lives next to it in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    name: CommandName,
    label: String,
    description: String,
    kind: CommandKind,
    parameters: Vec<CommandParameterSpec>,
    required_roles: BTreeSet<RoleId>,
    cooldown: Option<CooldownSpec>,
}

impl CommandDefinition {
    /// Creates a slash-command definition with no parameters, roles or
    /// cooldown.
    #[must_use]
    pub fn slash(name: CommandName, description: impl Into<String>) -> Self {
        Self {
            label: name.as_str().to_owned(),
            name,
            description: description.into(),
            kind: CommandKind::Slash,
            parameters: Vec::new(),
            required_roles: BTreeSet::new(),
            cooldown: None,
        }
    }

    /// Creates a user context-menu definition. `label` keeps the original
    /// casing shown in the menu.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidCommandName`] when the label is
    /// not a valid command name.
    pub fn user_context_menu(label: impl Into<String>) -> Result<Self, CommandDomainError> {
        let label_text = label.into().trim().to_owned();
        let name = CommandName::new(label_text.clone())?;
        Ok(Self {
            name,
            label: label_text,
            description: String::new(),
            kind: CommandKind::UserContextMenu,
            parameters: Vec::new(),
            required_roles: BTreeSet::new(),
            cooldown: None,
        })
    }

    /// Adds a parameter specification.
    #[must_use]
    pub fn with_parameter(mut self, parameter: CommandParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Restricts the command to users holding at least one of `roles`.
    #[must_use]
    pub fn with_required_roles(mut self, roles: impl IntoIterator<Item = RoleId>) -> Self {
        self.required_roles.extend(roles);
        self
    }

    /// Attaches a cooldown.
    #[must_use]
    pub const fn with_cooldown(mut self, cooldown: CooldownSpec) -> Self {
        self.cooldown = Some(cooldown);
        self
    }

    /// Returns the normalized command name.
    #[must_use]
    pub const fn name(&self) -> &CommandName {
        &self.name
    }

    /// Returns the name as shown to users.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the human-readable description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the command kind.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Returns parameter specifications in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[CommandParameterSpec] {
        &self.parameters
    }

    /// Returns the roles of which the invoker must hold at least one.
    #[must_use]
    pub const fn required_roles(&self) -> &BTreeSet<RoleId> {
        &self.required_roles
    }

    /// Returns the cooldown, if any.
    #[must_use]
    pub const fn cooldown(&self) -> Option<CooldownSpec> {
        self.cooldown
    }

    /// Checks the parameter schema.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidParameterDefinition`] for a
    /// duplicate parameter.
    pub fn validate_schema(&self) -> Result<(), CommandDomainError> {
        validate_parameter_definitions(self.name.as_str(), &self.parameters)
    }
}
