//! `minijinja` rendering for text replies.

use minijinja::Environment;
use serde_json::{Map, Value};

use crate::command::{domain::Invocation, ports::HandlerError};

/// Renders `template` against `context`.
///
/// # Errors
///
/// Returns [`HandlerError::Render`] when the template is invalid or refers
/// to something it cannot render.
pub fn render_template(
    template: &str,
    context: Map<String, Value>,
) -> Result<String, HandlerError> {
    Environment::new()
        .render_str(template, context)
        .map_err(HandlerError::render)
}

/// Builds the template context for an invocation: the command name, the
/// invoking user's mention and display name, then every argument by name.
#[must_use]
pub fn invocation_context(command: &str, invocation: &Invocation) -> Map<String, Value> {
    let caller = invocation.context();
    let mut context = Map::new();
    context.insert("command".to_owned(), Value::String(command.to_owned()));
    context.insert(
        "user_mention".to_owned(),
        Value::String(caller.user_id().mention()),
    );
    context.insert(
        "display_name".to_owned(),
        Value::String(caller.display_name().to_owned()),
    );
    for (key, value) in invocation.arguments() {
        context.insert(key.clone(), value.clone());
    }
    context
}
