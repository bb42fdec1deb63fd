//! Shared fixtures for bot tests.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::bot::sources::Sources;
use crate::command::domain::{ChannelId, Invocation, InvocationContext, UserId};
use crate::readiness::domain::{EquipmentSnapshot, EquippedItem};
use crate::upstream::{
    adapters::memory::{
        InMemoryCharacters, InMemoryGameData, InMemoryQuotes, InMemorySheets, InMemoryVideos,
    },
    domain::{CharacterProfile, RealmStatus, TokenPrice, VideoResult, WowQuote},
};

pub const CALLER: UserId = UserId::new(7);

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 18, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub fn invocation_at(timestamp: DateTime<Utc>, arguments: &[(&str, &str)]) -> Invocation {
    let context = InvocationContext::new(CALLER, ChannelId::new(2), timestamp)
        .with_display_name("Beymax Fan");
    let values: BTreeMap<String, Value> = arguments
        .iter()
        .map(|(key, value)| ((*key).to_owned(), Value::from(*value)))
        .collect();
    Invocation::new(context, values)
}

pub fn invocation(arguments: &[(&str, &str)]) -> Invocation {
    invocation_at(at(2024, 3, 14), arguments)
}

pub fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

pub fn realm() -> RealmStatus {
    RealmStatus {
        status: "Up".to_owned(),
        is_up: true,
        population: "Medium".to_owned(),
        has_queue: false,
        region: "North America".to_owned(),
        category: "United States".to_owned(),
        timezone: "America/Chicago".to_owned(),
        realms: vec!["Arygos".to_owned(), "Llane".to_owned()],
    }
}

pub fn profile() -> CharacterProfile {
    CharacterProfile {
        name: "Thrall".to_owned(),
        race: "Orc".to_owned(),
        class: "Shaman".to_owned(),
        active_spec: "Enhancement".to_owned(),
        realm: "Arygos".to_owned(),
        region: "us".to_owned(),
        thumbnail_url: "https://render.test/thrall.jpg".to_owned(),
        profile_url: "https://raider.test/thrall".to_owned(),
        equipment: EquipmentSnapshot::new(447)
            .with_item("back", EquippedItem::enchanted("6625"))
            .with_item("chest", EquippedItem::enchanted("6700"))
            .with_item("wrist", EquippedItem::enchanted("9999"))
            .with_item("legs", EquippedItem::bare()),
    }
}

pub fn quote() -> WowQuote {
    WowQuote {
        movie: "Cars".to_owned(),
        year: 2006,
        director: "John Lasseter".to_owned(),
        character: "Lightning McQueen".to_owned(),
        timestamp: "00:12:44".to_owned(),
        current_wow_in_movie: 1,
        total_wows_in_movie: 3,
        full_line: "Wow, a lot of people here.".to_owned(),
        video_url: None,
    }
}

/// Sources answering from memory: realm 99, a token price, one video,
/// the requirement and movie sheets and one profile on `arygos`.
pub fn sources() -> Sources {
    let mut requirement_rows = vec![cells(&["446"])];
    let mut enchant_row = vec![String::new(); 8];
    enchant_row.push("Waking Stats".to_owned());
    requirement_rows.push(enchant_row);

    let movie_rows = vec![
        cells(&["Name", "Rating", "Release"]),
        cells(&["Hackers", "PG-13", "1995"]),
        cells(&["Heat", "R", "1995", "Cops and robbers"]),
    ];

    Sources {
        game: Arc::new(
            InMemoryGameData::new()
                .with_token_price(TokenPrice::from_copper(2_345_678_901))
                .with_realm(99, realm()),
        ),
        characters: Arc::new(InMemoryCharacters::new().with_profile("arygos", profile())),
        videos: Arc::new(InMemoryVideos::new(vec![VideoResult {
            video_id: "dQw4w9WgXcQ".to_owned(),
            title: "Never Gonna Give You Up".to_owned(),
        }])),
        sheets: Arc::new(
            InMemorySheets::new()
                .with_rows("reqs", "Raid Requirements", requirement_rows)
                .with_rows("movies", "Movies", movie_rows),
        ),
        quotes: Arc::new(InMemoryQuotes::new(vec![quote()])),
    }
}
