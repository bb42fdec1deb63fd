//! Parser for `/command key=value` invocation input used by text hosts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CommandDomainError;

/// A parsed, not yet validated command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInvocation {
    command: String,
    arguments: BTreeMap<String, String>,
}

impl ParsedInvocation {
    /// Parses `/<command> key=value key2="quoted value"` input.
    ///
    /// Values may be wrapped in single or double quotes; inside quotes a
    /// backslash escapes the next character.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError`] when the input is empty or malformed.
    pub fn parse(raw_input: &str) -> Result<Self, CommandDomainError> {
        let mut tokens = Lexer::new(raw_input.trim()).tokens()?.into_iter();
        let command = tokens
            .next()
            .ok_or(CommandDomainError::EmptyInput)
            .and_then(|token| command_name(&token))?;

        let mut arguments = BTreeMap::new();
        for token in tokens {
            let (key, value) = argument_pair(&token)?;
            if arguments.contains_key(&key) {
                return Err(CommandDomainError::DuplicateArgument(key));
            }
            arguments.insert(key, value);
        }

        Ok(Self { command, arguments })
    }

    /// Returns the command name without the leading slash.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns raw argument values keyed by lower-cased name.
    #[must_use]
    pub const fn arguments(&self) -> &BTreeMap<String, String> {
        &self.arguments
    }

    /// Splits the invocation into command name and arguments.
    #[must_use]
    pub fn into_parts(self) -> (String, BTreeMap<String, String>) {
        (self.command, self.arguments)
    }
}

fn command_name(token: &str) -> Result<String, CommandDomainError> {
    let name = token
        .strip_prefix('/')
        .ok_or(CommandDomainError::MissingLeadingSlash)?;
    if !is_identifier(name) {
        return Err(CommandDomainError::InvalidCommandName(name.to_owned()));
    }
    Ok(name.to_ascii_lowercase())
}

fn argument_pair(token: &str) -> Result<(String, String), CommandDomainError> {
    let malformed = || CommandDomainError::InvalidArgumentToken {
        token: token.to_owned(),
    };
    let (key, value) = token.split_once('=').ok_or_else(malformed)?;
    if !is_identifier(key) {
        return Err(malformed());
    }
    Ok((key.to_ascii_lowercase(), value.to_owned()))
}

fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'))
}

#[derive(Clone, Copy)]
enum LexState {
    Bare,
    Quoted(char),
    Escaped(char),
}

struct Lexer<'a> {
    input: &'a str,
    state: LexState,
    current: String,
    tokens: Vec<String>,
}

impl<'a> Lexer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            state: LexState::Bare,
            current: String::new(),
            tokens: Vec::new(),
        }
    }

    fn tokens(mut self) -> Result<Vec<String>, CommandDomainError> {
        let input = self.input;
        if input.is_empty() {
            return Err(CommandDomainError::EmptyInput);
        }
        for character in input.chars() {
            self.state = match (self.state, character) {
                (LexState::Escaped(quote), _) => {
                    self.current.push(character);
                    LexState::Quoted(quote)
                }
                (LexState::Quoted(quote), '\\') => LexState::Escaped(quote),
                (LexState::Quoted(quote), _) if character == quote => LexState::Bare,
                (LexState::Quoted(quote), _) => {
                    self.current.push(character);
                    LexState::Quoted(quote)
                }
                (LexState::Bare, '"' | '\'') => LexState::Quoted(character),
                (LexState::Bare, '\\') => {
                    self.current.push(character);
                    return Err(CommandDomainError::InvalidArgumentToken {
                        token: std::mem::take(&mut self.current),
                    });
                }
                (LexState::Bare, _) if character.is_whitespace() => {
                    self.flush();
                    LexState::Bare
                }
                (LexState::Bare, _) => {
                    self.current.push(character);
                    LexState::Bare
                }
            };
        }

        if !matches!(self.state, LexState::Bare) {
            return Err(CommandDomainError::UnterminatedQuotedValue);
        }
        self.flush();
        Ok(self.tokens)
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.tokens.push(std::mem::take(&mut self.current));
        }
    }
}
