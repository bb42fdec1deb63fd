//! Plain-text replies: templated greetings, echo, mocking text and gif
//! picks.

use async_trait::async_trait;
use std::sync::Arc;

use crate::bot::picker::{Picker, pick};
use crate::bot::render::{invocation_context, render_template};
use crate::command::{
    domain::{CommandResponse, Invocation},
    ports::{CommandHandler, HandlerError, HandlerResult},
};

/// Replies with a `minijinja` template rendered against the invocation.
///
/// The context holds `command`, `user_mention`, `display_name` and every
/// argument by name.
#[derive(Debug, Clone)]
pub struct TemplateHandler {
    command: String,
    template: String,
}

impl TemplateHandler {
    /// Creates a handler rendering `template` for `command`.
    #[must_use]
    pub fn new(command: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            template: template.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for TemplateHandler {
    async fn handle(&self, invocation: &Invocation) -> HandlerResult {
        let context = invocation_context(&self.command, invocation);
        render_template(&self.template, context).map(CommandResponse::text)
    }
}

/// Alternates case by character position: even positions lower-case, odd
/// positions upper-case.
#[must_use]
pub fn mock_text(text: &str) -> String {
    text.chars()
        .enumerate()
        .flat_map(|(position, character)| {
            let upper = position.rem_euclid(2) == 1;
            let converted: Vec<char> = if upper {
                character.to_uppercase().collect()
            } else {
                character.to_lowercase().collect()
            };
            converted
        })
        .collect()
}

/// Replies with the `mock` argument in alternating case.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockHandler;

#[async_trait]
impl CommandHandler for MockHandler {
    async fn handle(&self, invocation: &Invocation) -> HandlerResult {
        let text = invocation
            .str_argument("mock")
            .ok_or_else(|| HandlerError::InvalidArgument("Give me something to mock.".to_owned()))?;
        Ok(CommandResponse::text(mock_text(text)))
    }
}

/// Replies with one link picked from a configured list.
#[derive(Clone)]
pub struct RandomLinkHandler {
    links: Arc<[String]>,
    picker: Arc<dyn Picker>,
}

impl RandomLinkHandler {
    /// Creates a handler choosing among `links`.
    #[must_use]
    pub fn new(links: impl IntoIterator<Item = String>, picker: Arc<dyn Picker>) -> Self {
        Self {
            links: links.into_iter().collect(),
            picker,
        }
    }
}

impl std::fmt::Debug for RandomLinkHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomLinkHandler")
            .field("links", &self.links.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandHandler for RandomLinkHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        Ok(pick(self.picker.as_ref(), &self.links).map_or_else(
            || CommandResponse::text("Nothing to show yet.").ephemeral(),
            CommandResponse::text,
        ))
    }
}
