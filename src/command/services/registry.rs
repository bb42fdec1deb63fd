//! Command registry: name to definition and handler.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::command::{
    domain::{CommandDefinition, CommandName},
    ports::CommandHandler,
};

/// Errors raised while building or querying the registry.
///
/// These are configuration or programming errors and are never shown to
/// users.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A command with the same name is already registered.
    #[error("duplicate command name: {0}")]
    DuplicateName(CommandName),

    /// No command with the requested name exists.
    #[error("command '/{0}' was not found")]
    UnknownCommand(String),

    /// The command's parameter schema is invalid.
    #[error("invalid command definition: {0}")]
    InvalidDefinition(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// A registered command: its metadata plus the handler producing its
/// response. Immutable once registered.
#[derive(Clone)]
pub struct CommandDescriptor {
    definition: CommandDefinition,
    handler: Arc<dyn CommandHandler>,
}

impl CommandDescriptor {
    /// Pairs a definition with its handler.
    #[must_use]
    pub fn new(definition: CommandDefinition, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            definition,
            handler,
        }
    }

    /// Returns the command metadata.
    #[must_use]
    pub const fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    /// Returns the command name.
    #[must_use]
    pub const fn name(&self) -> &CommandName {
        self.definition.name()
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> &Arc<dyn CommandHandler> {
        &self.handler
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Table of invocable commands, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    descriptors: Vec<Arc<CommandDescriptor>>,
    index: HashMap<CommandName, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] when the name is taken and
    /// [`RegistryError::InvalidDefinition`] when the parameter schema is
    /// invalid.
    pub fn register(&mut self, descriptor: CommandDescriptor) -> RegistryResult<()> {
        descriptor
            .definition()
            .validate_schema()
            .map_err(|error| RegistryError::InvalidDefinition(error.to_string()))?;

        let name = descriptor.name().clone();
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        self.index.insert(name, self.descriptors.len());
        self.descriptors.push(Arc::new(descriptor));
        Ok(())
    }

    /// Looks a command up by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCommand`] when nothing matches.
    pub fn resolve(&self, name: &str) -> RegistryResult<Arc<CommandDescriptor>> {
        CommandName::new(name)
            .ok()
            .and_then(|key| self.index.get(&key))
            .and_then(|position| self.descriptors.get(*position))
            .cloned()
            .ok_or_else(|| RegistryError::UnknownCommand(name.to_owned()))
    }

    /// Iterates descriptors in registration order.
    ///
    /// Each call starts a fresh iteration.
    pub fn list_all(&self) -> impl Iterator<Item = &CommandDescriptor> + '_ {
        self.descriptors.iter().map(AsRef::as_ref)
    }

    /// Returns the number of registered commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` when no command is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
