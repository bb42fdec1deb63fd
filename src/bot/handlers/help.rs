//! `/help`: the command list in two columns.

use async_trait::async_trait;

use crate::command::{
    domain::{CommandResponse, Embed, Invocation},
    ports::{CommandHandler, HandlerResult},
};

/// Sorts `names` as `/name` entries and splits them at the midpoint; the
/// second column gets the extra entry when the count is odd.
#[must_use]
pub fn help_columns<'a>(names: impl IntoIterator<Item = &'a str>) -> (String, String) {
    let mut entries: Vec<String> = names.into_iter().map(|name| format!("/{name}")).collect();
    entries.sort();
    let second = entries.split_off(entries.len().div_euclid(2));
    (entries.join("\n"), second.join("\n"))
}

/// Replies with a fixed, ephemeral command list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpHandler {
    first: String,
    second: String,
}

impl HelpHandler {
    /// Creates a handler listing `names`.
    #[must_use]
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let (first, second) = help_columns(names);
        Self { first, second }
    }
}

const fn column(text: &str) -> &str {
    if text.is_empty() { "None" } else { text }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        let embed = Embed::titled("Bot Commands")
            .field("User Commands", column(&self.first), true)
            .field("User Commands", column(&self.second), true);
        Ok(CommandResponse::embed(embed).ephemeral())
    }
}
