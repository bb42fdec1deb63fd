//! Error types for command definitions, invocation parsing and argument
//! validation.

use thiserror::Error;

/// Errors raised while building command definitions or validating an
/// invocation against them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandDomainError {
    /// Invocation input was empty.
    #[error("command input cannot be empty")]
    EmptyInput,

    /// Input does not start with `/`.
    #[error("commands must start with '/'")]
    MissingLeadingSlash,

    /// Command name is empty, too long or contains invalid characters.
    #[error("invalid command name '{0}'")]
    InvalidCommandName(String),

    /// An argument token does not match `key=value`.
    #[error(
        "invalid argument token '{token}': expected key=value (quote values containing backslashes)"
    )]
    InvalidArgumentToken {
        /// The malformed token text.
        token: String,
    },

    /// A quoted string was not terminated.
    #[error("unterminated quoted value in command input")]
    UnterminatedQuotedValue,

    /// Duplicate argument key.
    #[error("duplicate argument '{0}'")]
    DuplicateArgument(String),

    /// Cooldown must allow at least one invocation in a non-empty window.
    #[error("invalid cooldown: {max_invocations} invocation(s) per {window_seconds}s")]
    InvalidCooldown {
        /// Configured invocation cap.
        max_invocations: u32,
        /// Configured window length in seconds.
        window_seconds: u64,
    },

    /// Argument does not exist on the command definition.
    #[error("unknown argument '{parameter}' for command '/{command}'")]
    UnknownParameter {
        /// Command name.
        command: String,
        /// Unknown parameter name.
        parameter: String,
    },

    /// Required argument missing.
    #[error("missing required argument '{parameter}' for command '/{command}'")]
    MissingRequiredParameter {
        /// Command name.
        command: String,
        /// Missing parameter name.
        parameter: String,
    },

    /// Argument value is invalid for the declared type.
    #[error("invalid value for argument '{parameter}' in command '/{command}': {reason}")]
    InvalidParameterValue {
        /// Command name.
        command: String,
        /// Parameter name.
        parameter: String,
        /// Validation reason.
        reason: String,
    },

    /// Parameter schema is invalid.
    #[error("invalid parameter definition for '{parameter}' in command '/{command}': {reason}")]
    InvalidParameterDefinition {
        /// Command name.
        command: String,
        /// Parameter name.
        parameter: String,
        /// Validation reason.
        reason: String,
    },
}
