//! Replies built from external data sources.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, warn};

use crate::bot::picker::Picker;
use crate::bot::render::render_template;
use crate::command::{
    domain::{CommandResponse, Embed, Invocation},
    ports::{CommandHandler, HandlerError, HandlerResult},
};
use crate::upstream::{
    domain::{RealmStatus, TokenPrice, WowQuote},
    ports::{GameDataSource, QuoteSource, TabularSource, VideoSearch},
};

/// Guild logo used as the thumbnail of game embeds.
pub const GUILD_LOGO_URL: &str =
    "https://cdn.discordapp.com/attachments/676183284123828236/679823287521771602/mightcoloredfinishedsmall.png";

const QUOTE_TEMPLATE: &str = "{{ movie }} ({{ year }}), directed by {{ director }}\n\
At {{ timestamp }}, {{ character }}: Wow number {{ current }} out of {{ total }} total\n\
{% if video %}{{ video }}\n{% endif %}\"{{ full_line }}\"";

const QUOTE_FAILURE: &str = "Can't communicate with API. Sorry :(";
const MOVIE_FAILURE: &str = "Something went wrong. Sorry :(";
const SEARCH_RESULTS: u8 = 5;
const STATUS_UP_COLOR: u32 = 0x0000_ff00;
const STATUS_DOWN_COLOR: u32 = 0x00ff_0000;
const MOVIE_COLOR: u32 = 0x0000_ff00;

/// Formats a quote as the multi-line reply users see.
///
/// # Errors
///
/// Returns [`HandlerError::Render`] when the template fails.
pub fn format_quote(quote: &WowQuote) -> Result<String, HandlerError> {
    let mut context = Map::new();
    context.insert("movie".to_owned(), Value::from(quote.movie.as_str()));
    context.insert("year".to_owned(), Value::from(quote.year));
    context.insert("director".to_owned(), Value::from(quote.director.as_str()));
    context.insert("character".to_owned(), Value::from(quote.character.as_str()));
    context.insert("timestamp".to_owned(), Value::from(quote.timestamp.as_str()));
    context.insert("current".to_owned(), Value::from(quote.current_wow_in_movie));
    context.insert("total".to_owned(), Value::from(quote.total_wows_in_movie));
    context.insert(
        "video".to_owned(),
        quote.video_url.clone().map_or(Value::Null, Value::String),
    );
    context.insert("full_line".to_owned(), Value::from(quote.full_line.as_str()));
    render_template(QUOTE_TEMPLATE, context)
}

/// Replies with a random movie "wow".
#[derive(Clone)]
pub struct WowHandler {
    quotes: Arc<dyn QuoteSource>,
}

impl WowHandler {
    /// Creates a handler over `quotes`.
    #[must_use]
    pub const fn new(quotes: Arc<dyn QuoteSource>) -> Self {
        Self { quotes }
    }
}

#[async_trait]
impl CommandHandler for WowHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        match self.quotes.random_quote().await {
            Ok(quote) => format_quote(&quote).map(CommandResponse::text),
            Err(failure) => {
                warn!(error = %failure, "quote source failed");
                Ok(CommandResponse::text(QUOTE_FAILURE))
            }
        }
    }
}

/// Replies with the most relevant video for the `search` argument.
#[derive(Clone)]
pub struct JamsHandler {
    videos: Arc<dyn VideoSearch>,
}

impl JamsHandler {
    /// Creates a handler over `videos`.
    #[must_use]
    pub const fn new(videos: Arc<dyn VideoSearch>) -> Self {
        Self { videos }
    }
}

#[async_trait]
impl CommandHandler for JamsHandler {
    async fn handle(&self, invocation: &Invocation) -> HandlerResult {
        let query = invocation
            .str_argument("search")
            .ok_or_else(|| {
                HandlerError::InvalidArgument("Tell me what to search for.".to_owned())
            })?;
        let results = self
            .videos
            .search(query, SEARCH_RESULTS)
            .await
            .map_err(HandlerError::upstream)?;
        Ok(results.first().map_or_else(
            || CommandResponse::text(format!("No results for {query}")),
            |video| CommandResponse::text(video.watch_url()),
        ))
    }
}

/// Where game data is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLocation {
    /// API region.
    pub region: String,
    /// Response locale.
    pub locale: String,
    /// Connected realm id.
    pub realm_id: u32,
    /// Realm display name.
    pub realm_name: String,
}

/// Renders the token price embed.
#[must_use]
pub fn token_embed(price: &TokenPrice) -> Embed {
    Embed::titled("WoW Token")
        .field(
            "Current Price",
            format!("{} gold", price.formatted_gold()),
            true,
        )
        .thumbnail(GUILD_LOGO_URL)
}

/// Replies with the current token price.
#[derive(Clone)]
pub struct TokenHandler {
    game: Arc<dyn GameDataSource>,
    location: GameLocation,
}

impl TokenHandler {
    /// Creates a handler reading prices for `location`.
    #[must_use]
    pub const fn new(game: Arc<dyn GameDataSource>, location: GameLocation) -> Self {
        Self { game, location }
    }
}

#[async_trait]
impl CommandHandler for TokenHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        let price = self
            .game
            .token_price(&self.location.region, &self.location.locale)
            .await
            .map_err(HandlerError::upstream)?;
        Ok(CommandResponse::embed(token_embed(&price)))
    }
}

/// Renders the realm status embed titled `realm_name`.
#[must_use]
pub fn status_embed(realm_name: &str, status: &RealmStatus) -> Embed {
    let color = if status.is_up {
        STATUS_UP_COLOR
    } else {
        STATUS_DOWN_COLOR
    };
    let population = if status.population == "Offline" {
        "This server is currently Offline".to_owned()
    } else {
        format!("This is a {} pop server", status.population)
    };

    let mut embed = Embed::titled(realm_name)
        .color(color)
        .field(
            "Current Status",
            format!("Server is currently {}", status.status),
            true,
        )
        .field("Current Population", population, true)
        .field("Connected Realms", status.realms.join(", "), false);
    if status.has_queue {
        embed = embed.field("Queue Active", "Server has a login queue", true);
    }
    embed
        .field("Timezone", status.timezone.clone(), true)
        .thumbnail(GUILD_LOGO_URL)
}

/// Replies with the connected realm status.
#[derive(Clone)]
pub struct StatusHandler {
    game: Arc<dyn GameDataSource>,
    location: GameLocation,
}

impl StatusHandler {
    /// Creates a handler reporting on `location`.
    #[must_use]
    pub const fn new(game: Arc<dyn GameDataSource>, location: GameLocation) -> Self {
        Self { game, location }
    }
}

#[async_trait]
impl CommandHandler for StatusHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        let status = self
            .game
            .connected_realm(
                &self.location.region,
                &self.location.locale,
                self.location.realm_id,
            )
            .await
            .map_err(HandlerError::upstream)?;
        Ok(CommandResponse::embed(status_embed(
            &self.location.realm_name,
            &status,
        )))
    }
}

/// One row of the movie sheet.
///
/// Columns: name, rating, release date, description, tagline, audience
/// rating, runtime, genres, actors. Missing trailing cells read as
/// "Unknown".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRow {
    /// Title.
    pub name: String,
    /// Content rating.
    pub rating: String,
    /// Release date.
    pub release: String,
    /// Plot summary.
    pub description: String,
    /// Tagline.
    pub tagline: String,
    /// Audience score.
    pub audience_rating: String,
    /// Runtime.
    pub duration: String,
    /// Genres.
    pub genres: String,
    /// Cast.
    pub actors: String,
}

impl MovieRow {
    /// Reads a row by column position. Returns `None` when the title cell
    /// is blank.
    #[must_use]
    pub fn from_cells(cells: &[String]) -> Option<Self> {
        let cell = |position: usize| {
            cells
                .get(position)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .unwrap_or("Unknown")
                .to_owned()
        };
        let name = cells
            .first()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())?;
        Some(Self {
            name: name.to_owned(),
            rating: cell(1),
            release: cell(2),
            description: cell(3),
            tagline: cell(4),
            audience_rating: cell(5),
            duration: cell(6),
            genres: cell(7),
            actors: cell(8),
        })
    }
}

/// Renders a movie embed; `position` is one-based among `total` movies.
#[must_use]
pub fn movie_embed(movie: &MovieRow, position: usize, total: usize) -> Embed {
    Embed::titled(format!(
        "{} ({})\nRuntime: {}",
        movie.name, movie.rating, movie.duration
    ))
    .description(movie.tagline.clone())
    .color(MOVIE_COLOR)
    .field("Description", movie.description.clone(), false)
    .field("Genres", movie.genres.clone(), false)
    .field("Actors", movie.actors.clone(), false)
    .field("Audience Rating", movie.audience_rating.clone(), true)
    .field("Release Date", movie.release.clone(), true)
    .footer(format!("Movie {position} of {total}"))
}

/// Where the movie list lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSheet {
    /// Spreadsheet id.
    pub spreadsheet_id: String,
    /// Sheet name or range; the first row is a header.
    pub range: String,
}

/// Replies with a random movie from the sheet.
#[derive(Clone)]
pub struct MovieHandler {
    sheets: Arc<dyn TabularSource>,
    sheet: MovieSheet,
    picker: Arc<dyn Picker>,
}

impl MovieHandler {
    /// Creates a handler reading `sheet`.
    #[must_use]
    pub const fn new(
        sheets: Arc<dyn TabularSource>,
        sheet: MovieSheet,
        picker: Arc<dyn Picker>,
    ) -> Self {
        Self {
            sheets,
            sheet,
            picker,
        }
    }
}

#[async_trait]
impl CommandHandler for MovieHandler {
    async fn handle(&self, _invocation: &Invocation) -> HandlerResult {
        let rows = match self
            .sheets
            .rows(&self.sheet.spreadsheet_id, &self.sheet.range)
            .await
        {
            Ok(rows) => rows,
            Err(failure) => {
                error!(error = %failure, "movie sheet unavailable");
                return Ok(CommandResponse::text(MOVIE_FAILURE));
            }
        };

        let movies = rows.get(1..).unwrap_or_default();
        let picked = self
            .picker
            .pick_index(movies.len())
            .and_then(|position| Some((position, MovieRow::from_cells(movies.get(position)?)?)));
        let Some((position, movie)) = picked else {
            warn!(rows = movies.len(), "no usable movie row");
            return Ok(CommandResponse::text(MOVIE_FAILURE));
        };
        Ok(CommandResponse::embed(movie_embed(
            &movie,
            position.saturating_add(1),
            movies.len(),
        )))
    }
}
