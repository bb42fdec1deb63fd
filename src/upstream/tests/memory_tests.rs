//! Unit tests for the in-memory upstream sources.

use crate::readiness::domain::EquipmentSnapshot;
use crate::upstream::{
    adapters::memory::{InMemoryCharacters, InMemoryQuotes, InMemoryVideos, Unconfigured},
    domain::{CharacterProfile, UpstreamError, VideoResult, WowQuote},
    ports::{CharacterSource, QuoteSource, TabularSource, VideoSearch},
};
use rstest::rstest;

fn profile(name: &str) -> CharacterProfile {
    CharacterProfile {
        name: name.to_owned(),
        race: "Human".to_owned(),
        class: "Mage".to_owned(),
        active_spec: "Frost".to_owned(),
        realm: "Arygos".to_owned(),
        region: "us".to_owned(),
        thumbnail_url: String::new(),
        profile_url: String::new(),
        equipment: EquipmentSnapshot::new(450),
    }
}

fn quote(movie: &str) -> WowQuote {
    WowQuote {
        movie: movie.to_owned(),
        year: 2001,
        director: "Someone".to_owned(),
        character: "Someone Else".to_owned(),
        timestamp: "00:01:00".to_owned(),
        current_wow_in_movie: 1,
        total_wows_in_movie: 1,
        full_line: "Wow.".to_owned(),
        video_url: None,
    }
}

#[rstest]
#[tokio::test]
async fn characters_are_found_case_insensitively() {
    let source = InMemoryCharacters::new().with_profile("arygos", profile("Beymax"));
    let found = source
        .character_profile("us", "arygos", "BEYMAX")
        .await
        .expect("profile exists");
    assert_eq!(found.name, "Beymax");
}

#[rstest]
#[tokio::test]
async fn missing_character_is_not_found() {
    let source = InMemoryCharacters::new();
    let result = source.character_profile("us", "arygos", "nobody").await;
    assert!(matches!(
        result,
        Err(UpstreamError::NotFound { .. })
    ));
}

#[rstest]
#[tokio::test]
async fn video_search_honours_max_results() {
    let videos = (0..5)
        .map(|index| VideoResult {
            video_id: format!("v{index}"),
            title: format!("Video {index}"),
        })
        .collect();
    let results = InMemoryVideos::new(videos)
        .search("anything", 2)
        .await
        .expect("search succeeds");
    assert_eq!(results.len(), 2);
}

#[rstest]
#[tokio::test]
async fn quotes_cycle_in_order() {
    let source = InMemoryQuotes::new(vec![quote("A"), quote("B")]);
    let mut movies = Vec::new();
    for _ in 0..3 {
        movies.push(source.random_quote().await.expect("quote").movie);
    }
    assert_eq!(movies, ["A", "B", "A"]);
}

#[rstest]
#[tokio::test]
async fn empty_quote_source_has_nothing_to_serve() {
    let result = InMemoryQuotes::new(Vec::new()).random_quote().await;
    assert!(matches!(result, Err(UpstreamError::NotFound { .. })));
}

#[rstest]
#[tokio::test]
async fn unconfigured_source_names_itself() {
    let result = Unconfigured::new("google sheets").rows("id", "A1").await;
    assert_eq!(
        result,
        Err(UpstreamError::NotConfigured {
            source_name: "google sheets"
        })
    );
}
