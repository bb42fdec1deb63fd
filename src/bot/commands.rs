//! Assembles the command table from configuration.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::handlers::{
    GameLocation, HelpHandler, JamsHandler, MemberInfoHandler, MightconHandler, MockHandler,
    MovieHandler, MovieSheet, PickHandler, RandomLinkHandler, ReadinessHandler, RequirementSheet,
    StatusHandler, TemplateHandler, TokenHandler, WowHandler,
};
use super::links::{STATIC_LINKS, StaticLinkHandler};
use super::picker::Picker;
use super::sources::Sources;
use crate::command::{
    domain::{
        CommandDefinition, CommandDomainError, CommandKind, CommandName, CommandParameterSpec,
    },
    ports::CommandHandler,
    services::{CommandDescriptor, CommandRegistry, RegistryError},
};
use crate::config::{BotConfig, ConfigError};
use crate::readiness::services::ReadinessEvaluator;

/// Name of the member-info context-menu entry.
pub const MEMBER_INFO_LABEL: &str = "Show Member Info";

/// Failures while assembling the command table. All of them are fatal at
/// startup.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A command definition is invalid.
    #[error(transparent)]
    Definition(#[from] CommandDomainError),

    /// A configured cooldown is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

struct TableBuilder<'a> {
    config: &'a BotConfig,
    registry: CommandRegistry,
}

impl TableBuilder<'_> {
    fn slash(name: &str, description: &str) -> Result<CommandDefinition, BuildError> {
        Ok(CommandDefinition::slash(CommandName::new(name)?, description))
    }

    /// Registers `definition`. Rate-limited commands get the default
    /// cooldown; a configured override applies to any command.
    fn add(
        &mut self,
        definition: CommandDefinition,
        rate_limited: bool,
        handler: impl CommandHandler + 'static,
    ) -> Result<(), BuildError> {
        let name = definition.name().as_str().to_owned();
        let cooled = rate_limited || self.config.cooldown_overrides.contains_key(&name);
        let finished = if cooled {
            definition.with_cooldown(self.config.cooldown_for(&name)?)
        } else {
            definition
        };
        self.registry
            .register(CommandDescriptor::new(finished, Arc::new(handler)))?;
        Ok(())
    }
}

/// Builds every command from `config`, answering with data from `sources`
/// and choosing random content with `picker`.
///
/// `/help` lists the slash commands registered before it.
///
/// # Errors
///
/// Returns [`BuildError`] when a definition, cooldown or registration is
/// invalid, or when a cooldown override names no registered command.
pub fn build_registry(
    config: &BotConfig,
    sources: &Sources,
    picker: &Arc<dyn Picker>,
) -> Result<CommandRegistry, BuildError> {
    let mut table = TableBuilder {
        config,
        registry: CommandRegistry::new(),
    };

    for link in STATIC_LINKS {
        table.add(
            TableBuilder::slash(link.name, link.description)?,
            true,
            StaticLinkHandler::new(*link),
        )?;
    }

    table.add(
        TableBuilder::slash("hello", "Says hello!")?,
        false,
        TemplateHandler::new("hello", "Hi, {{ user_mention }}"),
    )?;
    table.add(
        TableBuilder::slash("send", "Sends the text into the current channel.")?.with_parameter(
            CommandParameterSpec::required("text")
                .with_description("Text to send in the current channel"),
        ),
        false,
        TemplateHandler::new("send", "{{ text }}"),
    )?;
    table.add(
        TableBuilder::slash("mock", "QuIt MaKiNg FuN oF mE")?.with_parameter(
            CommandParameterSpec::required("mock")
                .with_description("Mocking text"),
        ),
        false,
        MockHandler,
    )?;
    table.add(
        TableBuilder::slash("kat", "Squints")?,
        true,
        RandomLinkHandler::new(config.kat_gifs.iter().cloned(), Arc::clone(picker)),
    )?;
    table.add(
        TableBuilder::slash("mightcon2", "Mightcon 2: Las Vegas memories")?,
        false,
        MightconHandler::new(config.media.mightcon_dir.clone(), Arc::clone(picker)),
    )?;
    table.add(
        TableBuilder::slash("pick", "What should I play in Dragonflight?")?,
        false,
        PickHandler::new(
            &config.specs,
            config.media.icon_dir.clone(),
            Arc::clone(picker),
        ),
    )?;

    table.add(
        TableBuilder::slash("wow", "Wow")?,
        true,
        WowHandler::new(Arc::clone(&sources.quotes)),
    )?;
    table.add(
        TableBuilder::slash("jams", "Search YouTube for a video!")?.with_parameter(
            CommandParameterSpec::required("search")
                .with_description("Search criteria"),
        ),
        true,
        JamsHandler::new(Arc::clone(&sources.videos)),
    )?;

    let location = GameLocation {
        region: config.game.region.clone(),
        locale: config.game.locale.clone(),
        realm_id: config.game.realm_id,
        realm_name: config.game.realm_name.clone(),
    };
    table.add(
        TableBuilder::slash("token", "Current WoW token price in gold")?,
        true,
        TokenHandler::new(Arc::clone(&sources.game), location.clone()),
    )?;
    table.add(
        TableBuilder::slash(
            "status",
            &format!("Status of the {} server", config.game.realm_name),
        )?,
        true,
        StatusHandler::new(Arc::clone(&sources.game), location),
    )?;
    table.add(
        TableBuilder::slash("movie", "Get a random movie from Beyplex")?,
        true,
        MovieHandler::new(
            Arc::clone(&sources.sheets),
            MovieSheet {
                spreadsheet_id: config.movies.spreadsheet_id.clone(),
                range: config.movies.range.clone(),
            },
            Arc::clone(picker),
        ),
    )?;

    let readiness_roles = config.readiness_roles();
    if readiness_roles.is_empty() {
        warn!("readiness.allowed_roles is empty; /r2r is open to everyone");
    }
    let evaluator = ReadinessEvaluator::new(
        config.readiness.expected_slots.clone(),
        config.readiness.exempt_slot.clone(),
        Arc::new(config.enchants.clone()),
    );
    table.add(
        TableBuilder::slash("r2r", "Checks a user's character for raid readiness")?
            .with_parameter(
                CommandParameterSpec::required("character_name")
                    .with_description("character name"),
            )
            .with_parameter(
                CommandParameterSpec::optional("character_server")
                    .with_description("server name")
                    .with_default(config.game.realm_name.clone()),
            )
            .with_required_roles(readiness_roles),
        false,
        ReadinessHandler::new(
            Arc::clone(&sources.characters),
            Arc::clone(&sources.sheets),
            evaluator,
            RequirementSheet {
                spreadsheet_id: config.readiness.spreadsheet_id.clone(),
                range: config.readiness.range.clone(),
                url: config.readiness.sheet_url.clone(),
            },
            config.game.region.clone(),
            config.class_colors.clone(),
        ),
    )?;

    table.add(
        CommandDefinition::user_context_menu(MEMBER_INFO_LABEL)?,
        false,
        MemberInfoHandler,
    )?;

    let help = HelpHandler::new(
        table
            .registry
            .list_all()
            .filter(|descriptor| descriptor.definition().kind() == CommandKind::Slash)
            .map(|descriptor| descriptor.name().as_str()),
    );
    table.add(
        TableBuilder::slash("help", "List out the bot commands")?,
        false,
        help,
    )?;

    for command in config.cooldown_overrides.keys() {
        if table.registry.resolve(command).is_err() {
            return Err(ConfigError::Invalid {
                setting: format!("cooldown_overrides.{command}"),
                reason: "names no registered command".to_owned(),
            }
            .into());
        }
    }

    info!(commands = table.registry.len(), "command table built");
    Ok(table.registry)
}
