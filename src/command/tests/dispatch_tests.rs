//! Tests for the dispatcher.

use async_trait::async_trait;
use chrono::TimeDelta;
use rstest::rstest;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use super::support::{ManualClock, MockHandler, epoch, name};
use crate::command::{
    adapters::memory::InMemoryRateLimiter,
    domain::{
        Blacklist, ChannelId, CommandDefinition, CommandParameterSpec, CommandResponse,
        CooldownSpec, GuildId, Invocation, UserId,
    },
    ports::{CommandHandler, HandlerError, HandlerResult},
    services::{
        AdmissionPipeline, CommandDescriptor, CommandDispatcher, CommandRegistry, DispatchError,
        InvocationRequest, RegistryError,
    },
};

type TestDispatcher = CommandDispatcher<InMemoryRateLimiter, ManualClock>;

const BANNED: UserId = UserId::new(13);

fn dispatcher_with(
    definition: CommandDefinition,
    handler: Arc<dyn CommandHandler>,
    deadline: Duration,
) -> (TestDispatcher, Arc<ManualClock>) {
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDescriptor::new(definition, handler))
        .expect("valid command");
    let clock = Arc::new(ManualClock::at(epoch()));
    let admission = AdmissionPipeline::new(
        Arc::new(Blacklist::new([BANNED])),
        Arc::new(InMemoryRateLimiter::new()),
    );
    let dispatcher =
        CommandDispatcher::new(Arc::new(registry), admission, Arc::clone(&clock), deadline);
    (dispatcher, clock)
}

fn send_command() -> CommandDefinition {
    CommandDefinition::slash(name("send"), "Echo text")
        .with_parameter(CommandParameterSpec::required("text"))
        .with_cooldown(CooldownSpec::new(1, 10).expect("valid cooldown"))
}

fn request(command: &str, arguments: &[(&str, &str)]) -> InvocationRequest {
    InvocationRequest {
        command: command.to_owned(),
        arguments: arguments
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect(),
        user_id: UserId::new(1),
        display_name: "Tester".to_owned(),
        channel_id: ChannelId::new(2),
        guild_id: Some(GuildId::new(3)),
        roles: Vec::new(),
        target: None,
    }
}

fn first_field(response: &CommandResponse) -> Option<(&str, &str)> {
    response
        .embeds
        .first()
        .and_then(|embed| embed.fields.first())
        .map(|field| (field.name.as_str(), field.value.as_str()))
}

#[rstest]
#[tokio::test]
async fn admitted_invocation_reaches_the_handler_with_typed_arguments() {
    let mut handler = MockHandler::new();
    handler
        .expect_handle()
        .times(1)
        .withf(|invocation: &Invocation| {
            invocation.arguments().get("text") == Some(&json!("hi"))
                && invocation.context().timestamp() == epoch()
                && invocation.context().guild_id() == Some(GuildId::new(3))
        })
        .returning(|invocation| {
            Ok(CommandResponse::text(
                invocation.str_argument("text").unwrap_or_default(),
            ))
        });
    let (dispatcher, _clock) =
        dispatcher_with(send_command(), Arc::new(handler), Duration::from_secs(5));

    let response = dispatcher
        .dispatch(request("send", &[("text", "hi")]))
        .await
        .expect("dispatch succeeds");

    assert_eq!(response.content.as_deref(), Some("hi"));
    assert!(!response.ephemeral);
}

#[rstest]
#[tokio::test]
async fn unknown_command_is_an_internal_error() {
    let (dispatcher, _clock) = dispatcher_with(
        send_command(),
        Arc::new(MockHandler::new()),
        Duration::from_secs(5),
    );
    let result = dispatcher.dispatch(request("missing", &[])).await;
    assert!(matches!(
        result,
        Err(DispatchError::Registry(RegistryError::UnknownCommand(_)))
    ));
}

#[rstest]
#[tokio::test]
async fn invalid_arguments_skip_the_handler() {
    let mut handler = MockHandler::new();
    handler.expect_handle().times(0);
    let (dispatcher, _clock) =
        dispatcher_with(send_command(), Arc::new(handler), Duration::from_secs(5));

    let response = dispatcher
        .dispatch(request("send", &[]))
        .await
        .expect("dispatch succeeds");

    assert!(response.ephemeral);
    assert_eq!(
        first_field(&response).map(|(title, _)| title),
        Some("Invalid Arguments")
    );
}

#[rstest]
#[tokio::test]
async fn blacklisted_user_gets_a_denial_and_no_handler_run() {
    let mut handler = MockHandler::new();
    handler.expect_handle().times(0);
    let (dispatcher, _clock) =
        dispatcher_with(send_command(), Arc::new(handler), Duration::from_secs(5));
    let mut banned = request("send", &[("text", "hi")]);
    banned.user_id = BANNED;

    let response = dispatcher.dispatch(banned).await.expect("dispatch succeeds");

    assert!(response.ephemeral);
    assert_eq!(
        first_field(&response),
        Some(("Not Allowed", "You are not allowed to use this bot."))
    );
}

#[rstest]
#[tokio::test]
async fn cooldown_is_measured_on_the_injected_clock() {
    let mut handler = MockHandler::new();
    handler
        .expect_handle()
        .times(2)
        .returning(|_| Ok(CommandResponse::text("sent")));
    let (dispatcher, clock) =
        dispatcher_with(send_command(), Arc::new(handler), Duration::from_secs(5));

    let first = dispatcher
        .dispatch(request("send", &[("text", "a")]))
        .await
        .expect("dispatch succeeds");
    clock.advance(TimeDelta::milliseconds(2_500));
    let second = dispatcher
        .dispatch(request("send", &[("text", "b")]))
        .await
        .expect("dispatch succeeds");
    clock.advance(TimeDelta::milliseconds(7_500));
    let third = dispatcher
        .dispatch(request("send", &[("text", "c")]))
        .await
        .expect("dispatch succeeds");

    assert_eq!(first.content.as_deref(), Some("sent"));
    assert_eq!(
        first_field(&second),
        Some((
            "Command on Cooldown",
            "That command is on cooldown for 7.50 more seconds."
        ))
    );
    assert_eq!(third.content.as_deref(), Some("sent"));
}

#[rstest]
#[tokio::test]
async fn upstream_failure_becomes_a_generic_message() {
    let mut handler = MockHandler::new();
    handler.expect_handle().returning(|_| {
        Err(HandlerError::upstream(std::io::Error::other(
            "connection reset",
        )))
    });
    let (dispatcher, _clock) =
        dispatcher_with(send_command(), Arc::new(handler), Duration::from_secs(5));

    let response = dispatcher
        .dispatch(request("send", &[("text", "hi")]))
        .await
        .expect("dispatch succeeds");

    assert!(response.ephemeral);
    assert_eq!(
        response.content.as_deref(),
        Some("Something went wrong. Please try again later.")
    );
}

#[rstest]
#[tokio::test]
async fn argument_failure_from_the_handler_is_shown_verbatim() {
    let mut handler = MockHandler::new();
    handler
        .expect_handle()
        .returning(|_| Err(HandlerError::InvalidArgument("No results for nothing".to_owned())));
    let (dispatcher, _clock) =
        dispatcher_with(send_command(), Arc::new(handler), Duration::from_secs(5));

    let response = dispatcher
        .dispatch(request("send", &[("text", "nothing")]))
        .await
        .expect("dispatch succeeds");

    assert_eq!(response.content.as_deref(), Some("No results for nothing"));
}

struct StalledHandler;

#[async_trait]
impl CommandHandler for StalledHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(CommandResponse::text("too late"))
    }
}

#[rstest]
#[tokio::test]
async fn handler_past_the_deadline_times_out() {
    let (dispatcher, _clock) = dispatcher_with(
        send_command(),
        Arc::new(StalledHandler),
        Duration::from_millis(20),
    );

    let response = dispatcher
        .dispatch(request("send", &[("text", "hi")]))
        .await
        .expect("dispatch succeeds");

    assert!(response.ephemeral);
    assert_eq!(
        response.content.as_deref(),
        Some("The request timed out. Please try again later.")
    );
}

#[rstest]
#[tokio::test]
async fn optional_arguments_reach_the_handler_as_null() {
    let definition = CommandDefinition::slash(name("jams"), "Find a song")
        .with_parameter(CommandParameterSpec::optional("search"));
    let mut handler = MockHandler::new();
    handler
        .expect_handle()
        .withf(|invocation: &Invocation| {
            invocation.arguments()
                == &BTreeMap::from([("search".to_owned(), serde_json::Value::Null)])
        })
        .returning(|_| Ok(CommandResponse::text("ok")));
    let (dispatcher, _clock) =
        dispatcher_with(definition, Arc::new(handler), Duration::from_secs(5));

    let response = dispatcher
        .dispatch(request("jams", &[]))
        .await
        .expect("dispatch succeeds");
    assert_eq!(response.content.as_deref(), Some("ok"));
}
