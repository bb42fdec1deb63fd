//! "Show Member Info" context-menu command.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::command::{
    domain::{CommandResponse, Embed, Invocation, MemberTarget},
    ports::{CommandHandler, HandlerError, HandlerResult},
};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Describes how long ago `joined_at` was, relative to `now`.
///
/// The day count is left out when it is zero. A join time in the future
/// counts as zero elapsed time.
#[must_use]
pub fn join_age(joined_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(joined_at).num_seconds().max(0);
    let days = elapsed.div_euclid(SECONDS_PER_DAY);
    let within_day = elapsed.rem_euclid(SECONDS_PER_DAY);
    let hours = within_day.div_euclid(SECONDS_PER_HOUR);
    let minutes = within_day
        .rem_euclid(SECONDS_PER_HOUR)
        .div_euclid(SECONDS_PER_MINUTE);
    let seconds = within_day.rem_euclid(SECONDS_PER_MINUTE);
    if days == 0 {
        format!("That's {hours} hours, {minutes} minutes, {seconds} seconds ago")
    } else {
        format!("That's {days} days, {hours} hours, {minutes} minutes, {seconds} seconds ago")
    }
}

/// Renders the member card as seen at `now`.
#[must_use]
pub fn member_embed(member: &MemberTarget, now: DateTime<Utc>) -> Embed {
    let roles = if member.roles.is_empty() {
        "None".to_owned()
    } else {
        member
            .roles
            .iter()
            .map(|role| role.mention())
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut embed = Embed::titled(format!("Member Info for {}", member.display_name))
        .field(
            format!(
                "{} joined on <t:{}>",
                member.display_name,
                member.joined_at.timestamp()
            ),
            join_age(member.joined_at, now),
            true,
        )
        .field("Roles", roles, false)
        .author(member.display_name.clone(), member.avatar_url.clone());
    if let Some(color) = member.color {
        embed = embed.color(color);
    }
    embed
}

/// Shows when the targeted member joined and which roles they hold.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberInfoHandler;

#[async_trait]
impl CommandHandler for MemberInfoHandler {
    async fn handle(&self, invocation: &Invocation) -> HandlerResult {
        let member = invocation.target().ok_or_else(|| {
            HandlerError::InvalidArgument("Pick a guild member to show.".to_owned())
        })?;
        Ok(CommandResponse::embed(member_embed(
            member,
            invocation.context().timestamp(),
        )))
    }
}
