//! Dispatcher: resolve, validate, admit, then run the command body.

use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{Instrument, debug, error, info_span, warn};

use crate::command::{
    domain::{
        AdmissionDecision, AdmissionDenial, ChannelId, CommandResponse, Embed, GuildId,
        Invocation, InvocationContext, MemberTarget, RoleId, UserId, validate_arguments,
    },
    ports::{RateLimitError, RateLimiter},
    services::{AdmissionPipeline, CommandDescriptor, CommandRegistry, RegistryError},
};

const ERROR_ICON_URL: &str = "https://cdn0.iconfinder.com/data/icons/shift-interfaces/32/Error-512.png";

/// One incoming command event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Command name (slash name or context-menu label).
    pub command: String,
    /// Raw argument strings keyed by parameter name.
    #[serde(default)]
    pub arguments: BTreeMap<String, String>,
    /// Invoking user.
    pub user_id: UserId,
    /// Invoking user's display name.
    #[serde(default)]
    pub display_name: String,
    /// Channel of the invocation.
    pub channel_id: ChannelId,
    /// Guild of the invocation; absent in direct messages.
    #[serde(default)]
    pub guild_id: Option<GuildId>,
    /// Roles the invoking user holds.
    #[serde(default)]
    pub roles: Vec<RoleId>,
    /// Member targeted by a context-menu command.
    #[serde(default)]
    pub target: Option<MemberTarget>,
}

/// Internal failures that prevent any response from being produced.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The command is not registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The rate limiter could not be consulted.
    #[error(transparent)]
    RateLimiter(#[from] RateLimitError),
}

/// Routes invocations through admission to their handlers.
#[derive(Clone)]
pub struct CommandDispatcher<L, C>
where
    L: RateLimiter,
    C: Clock + Send + Sync,
{
    registry: Arc<CommandRegistry>,
    admission: AdmissionPipeline<L>,
    clock: Arc<C>,
    deadline: Duration,
}

impl<L, C> CommandDispatcher<L, C>
where
    L: RateLimiter,
    C: Clock + Send + Sync,
{
    /// Creates a dispatcher. `deadline` bounds every handler run.
    #[must_use]
    pub const fn new(
        registry: Arc<CommandRegistry>,
        admission: AdmissionPipeline<L>,
        clock: Arc<C>,
        deadline: Duration,
    ) -> Self {
        Self {
            registry,
            admission,
            clock,
            deadline,
        }
    }

    /// Returns the registry commands are resolved against.
    #[must_use]
    pub const fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    /// Handles one invocation end to end.
    ///
    /// Argument problems, admission denials, handler failures and handler
    /// timeouts all produce a user-visible response.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when the command is unknown or the rate
    /// limiter is unavailable.
    pub async fn dispatch(
        &self,
        request: InvocationRequest,
    ) -> Result<CommandResponse, DispatchError> {
        let InvocationRequest {
            command,
            arguments,
            user_id,
            display_name,
            channel_id,
            guild_id,
            roles,
            target,
        } = request;

        let descriptor = self.registry.resolve(&command)?;
        let mut context = InvocationContext::new(user_id, channel_id, self.clock.utc())
            .with_roles(roles)
            .with_display_name(display_name);
        if let Some(guild) = guild_id {
            context = context.in_guild(guild);
        }

        let span = info_span!(
            "invocation",
            id = %context.invocation_id(),
            command = %descriptor.name(),
            user = %user_id,
        );

        self.run(descriptor, context, arguments, target)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        descriptor: Arc<CommandDescriptor>,
        context: InvocationContext,
        arguments: BTreeMap<String, String>,
        target: Option<MemberTarget>,
    ) -> Result<CommandResponse, DispatchError> {
        let definition = descriptor.definition();
        let typed = match validate_arguments(
            definition.name().as_str(),
            definition.parameters(),
            &arguments,
        ) {
            Ok(typed) => typed,
            Err(error) => {
                debug!(%error, "invalid arguments");
                return Ok(error_response("Invalid Arguments", &error.to_string()));
            }
        };

        if let AdmissionDecision::Denied(denial) = self.admission.admit(definition, &context)? {
            return Ok(denial_response(&denial));
        }

        let invocation = Invocation::new(context, typed).with_target(target);
        match tokio::time::timeout(self.deadline, descriptor.handler().handle(&invocation)).await {
            Ok(Ok(response)) => {
                debug!("handler completed");
                Ok(response)
            }
            Ok(Err(failure)) => {
                error!(error = %failure, "handler failed");
                Ok(CommandResponse::text(failure.user_message()).ephemeral())
            }
            Err(_) => {
                warn!(deadline = ?self.deadline, "handler timed out");
                Ok(
                    CommandResponse::text("The request timed out. Please try again later.")
                        .ephemeral(),
                )
            }
        }
    }
}

fn error_response(title: &str, message: &str) -> CommandResponse {
    CommandResponse::embed(
        Embed::titled("Error")
            .field(title, message, false)
            .thumbnail(ERROR_ICON_URL),
    )
    .ephemeral()
}

/// Renders an admission denial the way users see it.
#[must_use]
pub fn denial_response(denial: &AdmissionDenial) -> CommandResponse {
    match denial {
        AdmissionDenial::Blacklisted => {
            error_response("Not Allowed", "You are not allowed to use this bot.")
        }
        AdmissionDenial::MissingRole { required } => {
            let roles = required
                .iter()
                .map(|role| role.mention())
                .collect::<Vec<_>>()
                .join(", ");
            let response = error_response(
                "Permission Missing",
                "You're missing a permission to do that.",
            );
            with_extra_field(response, "Required Roles", &roles)
        }
        AdmissionDenial::OnCooldown { retry_after } => {
            let millis = retry_after.num_milliseconds().max(0);
            let message = format!(
                "That command is on cooldown for {}.{:02} more seconds.",
                millis.div_euclid(1000),
                millis.rem_euclid(1000).div_euclid(10)
            );
            error_response("Command on Cooldown", &message)
        }
    }
}

fn with_extra_field(mut response: CommandResponse, name: &str, value: &str) -> CommandResponse {
    response.embeds = response
        .embeds
        .into_iter()
        .map(|embed| embed.field(name, value, false))
        .collect();
    response
}
