//! Shared world state for command admission scenarios.

use async_trait::async_trait;
use beymax::command::{
    adapters::memory::InMemoryRateLimiter,
    domain::{Blacklist, CommandDefinition, CommandResponse, Invocation, UserId},
    ports::{CommandHandler, HandlerResult},
    services::{AdmissionPipeline, CommandDescriptor, CommandDispatcher, CommandRegistry},
};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use eyre::{WrapErr, eyre};
use mockable::Clock;
use rstest::fixture;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Dispatcher type used by the scenarios.
pub type ScenarioDispatcher = CommandDispatcher<InMemoryRateLimiter, StepClock>;

/// Reply of every scenario command body.
pub const BODY_REPLY: &str = "ran";

/// Clock moved explicitly by `When ... seconds pass`.
#[derive(Debug)]
pub struct StepClock {
    now: Mutex<DateTime<Utc>>,
}

impl StepClock {
    fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta: TimeDelta) -> eyre::Result<()> {
        let mut now = self.now.lock().map_err(|_| eyre!("clock lock poisoned"))?;
        *now += delta;
        Ok(())
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map(|now| *now)
            .unwrap_or_else(|poisoned| *poisoned.into_inner())
    }
}

/// Command body counting its runs.
pub struct CountingHandler {
    runs: Arc<AtomicUsize>,
}

#[async_trait]
impl CommandHandler for CountingHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(CommandResponse::text(BODY_REPLY))
    }
}

/// Scenario world for admission behaviour tests.
pub struct AdmissionWorld {
    pub definitions: Vec<CommandDefinition>,
    pub blacklist: Vec<UserId>,
    pub clock: Arc<StepClock>,
    pub runs: Arc<AtomicUsize>,
    pub dispatcher: Option<ScenarioDispatcher>,
    pub last_response: Option<CommandResponse>,
}

impl AdmissionWorld {
    /// Creates a world with no commands and an empty blacklist.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 20, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            definitions: Vec::new(),
            blacklist: Vec::new(),
            clock: Arc::new(StepClock::starting_at(start)),
            runs: Arc::new(AtomicUsize::new(0)),
            dispatcher: None,
            last_response: None,
        }
    }

    /// Builds the dispatcher on first use from the declared commands.
    pub fn dispatcher(&mut self) -> eyre::Result<&ScenarioDispatcher> {
        if self.dispatcher.is_none() {
            let mut registry = CommandRegistry::new();
            for definition in self.definitions.drain(..) {
                let handler = Arc::new(CountingHandler {
                    runs: Arc::clone(&self.runs),
                });
                registry
                    .register(CommandDescriptor::new(definition, handler))
                    .wrap_err("register scenario command")?;
            }
            let admission = AdmissionPipeline::new(
                Arc::new(Blacklist::new(self.blacklist.iter().copied())),
                Arc::new(InMemoryRateLimiter::new()),
            );
            self.dispatcher = Some(CommandDispatcher::new(
                Arc::new(registry),
                admission,
                Arc::clone(&self.clock),
                Duration::from_secs(5),
            ));
        }
        self.dispatcher
            .as_ref()
            .ok_or_else(|| eyre!("dispatcher missing after construction"))
    }
}

impl Default for AdmissionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AdmissionWorld {
    AdmissionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
