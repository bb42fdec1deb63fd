//! Runs the bot against line-delimited JSON on stdin and stdout.
//!
//! Configuration is read from `beymax.toml` (or the file named by
//! `BEYMAX_CONFIG`); API keys come from the environment or a `.env` file.

use beymax::bot::{Picker, RandomPicker, Sources, build_registry};
use beymax::command::{
    adapters::memory::InMemoryRateLimiter,
    services::{AdmissionPipeline, CommandDispatcher},
};
use beymax::config::{BotConfig, Secrets};
use beymax::{host, telemetry};
use eyre::WrapErr;
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init().wrap_err("failed to install the log subscriber")?;

    let config = BotConfig::from_env().wrap_err("failed to load configuration")?;
    let secrets = Secrets::from_env(config.upstream.require_secrets)
        .wrap_err("failed to read API credentials")?;
    let sources = Sources::from_settings(&config.upstream, &secrets)
        .wrap_err("failed to build upstream clients")?;
    let picker: Arc<dyn Picker> = Arc::new(RandomPicker);
    let registry = build_registry(&config, &sources, &picker)
        .wrap_err("failed to build the command table")?;

    let dispatcher = Arc::new(CommandDispatcher::new(
        Arc::new(registry),
        AdmissionPipeline::new(config.blacklist(), Arc::new(InMemoryRateLimiter::new())),
        Arc::new(DefaultClock),
        config.handler_deadline(),
    ));
    info!(guild = ?config.guild_id, "beymax ready");

    host::serve(
        dispatcher,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
    .wrap_err("host loop failed")?;
    info!("beymax stopped");
    Ok(())
}
