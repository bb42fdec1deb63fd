//! Shared doubles for command tests.

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

use crate::command::{
    domain::{CommandName, CommandResponse, Invocation},
    ports::{CommandHandler, HandlerResult},
};

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn name(raw: &str) -> CommandName {
    CommandName::new(raw).expect("valid command name")
}

/// Handler answering with fixed text.
pub struct EchoHandler(pub &'static str);

#[async_trait]
impl CommandHandler for EchoHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        Ok(CommandResponse::text(self.0))
    }
}

mockall::mock! {
    pub Handler {}

    #[async_trait]
    impl CommandHandler for Handler {
        async fn handle(&self, invocation: &Invocation) -> HandlerResult;
    }
}
