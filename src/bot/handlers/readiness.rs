//! `/r2r`: raid readiness of one character.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::command::{
    domain::{CommandResponse, Embed, Invocation},
    ports::{CommandHandler, HandlerError, HandlerResult},
};
use crate::readiness::{
    domain::{ReadinessReport, ReadinessRequirement, SlotOutcome},
    services::ReadinessEvaluator,
};
use crate::upstream::{
    domain::{CharacterProfile, UpstreamError, realm_slug},
    ports::{CharacterSource, TabularSource},
};

const PASS_MARK: &str = "\u{2705}";
const FAIL_MARK: &str = "\u{274c}";
const UNKNOWN_ENCHANT: &str =
    "Non-Dragonflight Enchant. Check armory or add it to the list of accepted enchants";

/// Sheet holding the requirement and the link shown on the embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementSheet {
    /// Spreadsheet id.
    pub spreadsheet_id: String,
    /// Sheet name or range.
    pub range: String,
    /// Public link to the sheet.
    pub url: Option<String>,
}

/// Everything the embed needs besides the report.
#[derive(Debug, Clone, Copy)]
pub struct ReadinessView<'a> {
    /// Region used in profile links.
    pub region: &'a str,
    /// Realm slug used in profile links.
    pub realm_slug: &'a str,
    /// Sidebar colour.
    pub color: u32,
    /// Title link.
    pub sheet_url: Option<&'a str>,
}

const fn mark(passed: bool) -> &'static str {
    if passed { PASS_MARK } else { FAIL_MARK }
}

fn checked_slots_line(evaluator: &ReadinessEvaluator) -> String {
    evaluator
        .expected_slots()
        .iter()
        .map(|slot| {
            if slot.as_str() == "offhand" {
                format!("{} (if applicable)", slot.display_name())
            } else {
                slot.display_name()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a readiness report.
///
/// Unenchanted slots are listed in the footer only; every other checked
/// slot gets its own field.
#[must_use]
pub fn readiness_embed(
    profile: &CharacterProfile,
    report: &ReadinessReport,
    checked_slots: &str,
    view: ReadinessView<'_>,
) -> Embed {
    let ReadinessView {
        region,
        realm_slug: slug,
        color,
        sheet_url,
    } = view;
    let name = &profile.name;
    let description = format!(
        "{name}, {} {}\n\
         [Armory](https://worldofwarcraft.com/en-us/character/{region}/{slug}/{name}) | \
         [Raider.io](https://raider.io/characters/{region}/{slug}/{name}) | \
         [Warcraft Logs](https://www.warcraftlogs.com/character/{region}/{slug}/{name}) | \
         [Raidbots](https://www.raidbots.com/simbot/quick?region={region}&realm={slug}&name={name})",
        profile.active_spec, profile.class
    );

    let mut embed = Embed::titled("Ready to Raid Checker")
        .description(description)
        .color(color)
        .field("Check for these enchanted slots:", checked_slots, false)
        .field(
            "Item Level Equipped",
            format!("{} {}", mark(report.level.passed), report.level.equipped),
            true,
        );
    if let Some(url) = sheet_url {
        embed = embed.url(url);
    }

    for row in &report.slots {
        let value = match &row.outcome {
            SlotOutcome::Pass { enchant } => format!("{PASS_MARK} {enchant}"),
            SlotOutcome::Fail { enchant } => format!("{FAIL_MARK} {enchant}"),
            SlotOutcome::UnknownEnchant { .. } => format!("{FAIL_MARK} {UNKNOWN_ENCHANT}"),
            SlotOutcome::Unenchanted => continue,
        };
        embed = embed.field(row.slot.display_name(), value, false);
    }

    let unenchanted = report
        .unenchanted_slots()
        .map(|slot| slot.as_str())
        .collect::<Vec<_>>();
    let footer = if unenchanted.is_empty() {
        "None".to_owned()
    } else {
        unenchanted.join(", ")
    };
    embed
        .footer(format!("Unenchanted Slots: {footer}"))
        .thumbnail(profile.thumbnail_url.clone())
}

/// Fetches the requirement and the character, then reports readiness.
#[derive(Clone)]
pub struct ReadinessHandler {
    characters: Arc<dyn CharacterSource>,
    sheets: Arc<dyn TabularSource>,
    evaluator: ReadinessEvaluator,
    sheet: RequirementSheet,
    region: String,
    class_colors: BTreeMap<String, u32>,
}

impl ReadinessHandler {
    /// Creates a handler.
    #[must_use]
    pub const fn new(
        characters: Arc<dyn CharacterSource>,
        sheets: Arc<dyn TabularSource>,
        evaluator: ReadinessEvaluator,
        sheet: RequirementSheet,
        region: String,
        class_colors: BTreeMap<String, u32>,
    ) -> Self {
        Self {
            characters,
            sheets,
            evaluator,
            sheet,
            region,
            class_colors,
        }
    }

    async fn requirement(&self) -> Result<ReadinessRequirement, HandlerError> {
        let rows = self
            .sheets
            .rows(&self.sheet.spreadsheet_id, &self.sheet.range)
            .await
            .map_err(HandlerError::upstream)?;
        let requirement = ReadinessRequirement::from_table(
            &rows,
            self.evaluator.catalog(),
            self.evaluator.expected_slots(),
        )?;
        debug!(
            min_item_level = requirement.min_item_level(),
            "requirement loaded"
        );
        Ok(requirement)
    }
}

#[async_trait]
impl CommandHandler for ReadinessHandler {
    async fn handle(&self, invocation: &Invocation) -> HandlerResult {
        let name = invocation
            .str_argument("character_name")
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| HandlerError::InvalidArgument("Which character?".to_owned()))?;
        let server = invocation
            .str_argument("character_server")
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| HandlerError::InvalidArgument("Which server?".to_owned()))?;

        let requirement = self.requirement().await?;
        let slug = realm_slug(server);
        let profile = self
            .characters
            .character_profile(&self.region, &slug, name)
            .await
            .map_err(|failure| match failure {
                UpstreamError::NotFound { .. } => HandlerError::InvalidArgument(format!(
                    "Could not find {name} on {server}."
                )),
                other => HandlerError::upstream(other),
            })?;

        let report = self.evaluator.evaluate(&profile.equipment, &requirement);
        info!(
            character = %profile.name,
            realm = %slug,
            unenchanted = report.unenchanted_slots().count(),
            level_passed = report.level.passed,
            "readiness evaluated"
        );

        let view = ReadinessView {
            region: &self.region,
            realm_slug: &slug,
            color: self.class_colors.get(&profile.class).copied().unwrap_or_default(),
            sheet_url: self.sheet.url.as_deref(),
        };
        let embed = readiness_embed(
            &profile,
            &report,
            &checked_slots_line(&self.evaluator),
            view,
        );
        Ok(CommandResponse::embed(embed))
    }
}
