//! Command parameter schema and argument validation.
//!
//! Every parameter is a text option: the host passes strings and handlers
//! read them back as JSON strings.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use super::CommandDomainError;

/// One named text option of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandParameterSpec {
    /// Lower-case parameter name.
    pub name: String,
    /// Human-readable description shown by the host.
    #[serde(default)]
    pub description: String,
    /// Whether the caller must supply a value.
    pub required: bool,
    /// Value used when an optional parameter is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl CommandParameterSpec {
    fn new(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            description: String::new(),
            required,
            default_value: None,
        }
    }

    /// A parameter the caller must supply with a non-blank value.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// A parameter the caller may omit.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// Sets the description shown by the host.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the value substituted when the argument is omitted.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Rejects a parameter list that declares the same name twice.
///
/// # Errors
///
/// Returns [`CommandDomainError::InvalidParameterDefinition`] naming the
/// repeated parameter.
pub fn validate_parameter_definitions(
    command: &str,
    parameters: &[CommandParameterSpec],
) -> Result<(), CommandDomainError> {
    let mut seen = HashSet::new();
    match parameters
        .iter()
        .find(|parameter| !seen.insert(parameter.name.as_str()))
    {
        Some(repeated) => Err(CommandDomainError::InvalidParameterDefinition {
            command: command.to_owned(),
            parameter: repeated.name.clone(),
            reason: "duplicate parameter definition".to_owned(),
        }),
        None => Ok(()),
    }
}

/// Checks raw arguments against `parameters` and returns them as JSON
/// strings keyed by parameter name.
///
/// Omitted optional parameters take their default, or [`Value::Null`] when
/// none is declared.
///
/// # Errors
///
/// Returns [`CommandDomainError`] for an unknown argument, a missing
/// required argument, or a required argument that is blank.
pub fn validate_arguments(
    command: &str,
    parameters: &[CommandParameterSpec],
    provided: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, Value>, CommandDomainError> {
    if let Some(unknown) = provided
        .keys()
        .find(|key| !parameters.iter().any(|parameter| parameter.name == **key))
    {
        return Err(CommandDomainError::UnknownParameter {
            command: command.to_owned(),
            parameter: unknown.clone(),
        });
    }

    let mut typed = BTreeMap::new();
    for parameter in parameters {
        let value = match provided.get(&parameter.name) {
            Some(raw) if parameter.required && raw.trim().is_empty() => {
                return Err(CommandDomainError::InvalidParameterValue {
                    command: command.to_owned(),
                    parameter: parameter.name.clone(),
                    reason: "must not be blank".to_owned(),
                });
            }
            Some(raw) => Value::String(raw.clone()),
            None if parameter.required => {
                return Err(CommandDomainError::MissingRequiredParameter {
                    command: command.to_owned(),
                    parameter: parameter.name.clone(),
                });
            }
            None => parameter
                .default_value
                .clone()
                .map_or(Value::Null, Value::String),
        };
        typed.insert(parameter.name.clone(), value);
    }

    Ok(typed)
}
