//! Dispatcher scenarios over test doubles
//!
//! Exercises classification priority, handler routing, session lifecycle,
//! and the rule that no handler failure escapes the dispatcher.

mod common;

use common::{
    artifact_count, driver_launches, fail_media_wait, test_config, FakeDriver, RecordingOpener,
    RecordingVoice,
};
use vaani_assistant::automation::SessionState;
use vaani_assistant::dispatch::Dispatcher;
use vaani_assistant::phrases;

type TestDispatcher = Dispatcher<RecordingVoice, FakeDriver, RecordingOpener>;

fn dispatcher(
    dir: &std::path::Path,
    opener: RecordingOpener,
) -> (TestDispatcher, RecordingVoice) {
    let voice = RecordingVoice::default();
    let dispatcher = Dispatcher::new(&test_config(dir), voice.clone(), opener);
    (dispatcher, voice)
}

#[tokio::test]
async fn empty_command_is_a_silent_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let (mut d, voice) = dispatcher(dir.path(), RecordingOpener::default());

    d.dispatch("").await.unwrap();
    d.dispatch("   ").await.unwrap();

    assert!(voice.spoken().is_empty());
}

#[tokio::test]
async fn unrecognized_speaks_the_fallback_and_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let opener = RecordingOpener::default();
    let (mut d, voice) = dispatcher(dir.path(), opener.clone());

    d.dispatch("make me a sandwich").await.unwrap();

    assert_eq!(voice.spoken(), vec![phrases::UNRECOGNIZED.to_string()]);
    assert_eq!(d.media().state(), SessionState::Absent);
    assert_eq!(driver_launches(), 0);
    assert!(opener.urls().is_empty());
}

#[tokio::test]
async fn open_resolves_known_names_through_the_directory() {
    let dir = tempfile::tempdir().unwrap();
    let opener = RecordingOpener::default();
    let (mut d, voice) = dispatcher(dir.path(), opener.clone());

    d.dispatch("open GitHub").await.unwrap();

    assert_eq!(opener.urls(), vec!["https://www.github.com".to_string()]);
    assert_eq!(voice.spoken(), vec!["Opening GitHub".to_string()]);
}

#[tokio::test]
async fn open_lowercase_name_misses_the_directory_and_guesses() {
    let dir = tempfile::tempdir().unwrap();
    let opener = RecordingOpener::default();
    let (mut d, voice) = dispatcher(dir.path(), opener.clone());

    // Directory lookup is exact-match; "netlify" misses the "Netlify" entry
    // and resolves through the www.{name}.com fallback instead
    d.dispatch("open netlify").await.unwrap();

    assert_eq!(opener.urls(), vec!["https://www.netlify.com".to_string()]);
    assert_eq!(voice.spoken(), vec!["Opening netlify".to_string()]);
}

#[tokio::test]
async fn open_prefix_wins_over_search_keyword() {
    let dir = tempfile::tempdir().unwrap();
    let opener = RecordingOpener::default();
    let (mut d, voice) = dispatcher(dir.path(), opener.clone());

    d.dispatch("open research portal").await.unwrap();

    // Classified as OpenSite, not WebSearch
    assert_eq!(voice.spoken(), vec!["Opening research portal".to_string()]);
    assert_eq!(
        opener.urls(),
        vec!["https://www.research portal.com".to_string()]
    );
}

#[tokio::test]
async fn open_failure_becomes_a_spoken_apology() {
    let dir = tempfile::tempdir().unwrap();
    let (mut d, voice) = dispatcher(dir.path(), RecordingOpener::failing());

    d.dispatch("open gmail").await.unwrap();

    assert_eq!(voice.spoken(), vec![phrases::OPEN_APOLOGY.to_string()]);
}

#[tokio::test]
async fn search_opens_an_encoded_query_url() {
    let dir = tempfile::tempdir().unwrap();
    let opener = RecordingOpener::default();
    let (mut d, voice) = dispatcher(dir.path(), opener.clone());

    d.dispatch("search rust async traits").await.unwrap();

    assert_eq!(
        opener.urls(),
        vec!["https://www.google.com/search?q=rust%20async%20traits".to_string()]
    );
    assert_eq!(voice.spoken(), vec!["Searching for rust async traits".to_string()]);
}

#[tokio::test]
async fn media_command_without_query_asks_and_leaves_the_session_alone() {
    let dir = tempfile::tempdir().unwrap();
    let (mut d, voice) = dispatcher(dir.path(), RecordingOpener::default());

    d.dispatch("youtube").await.unwrap();

    assert_eq!(voice.spoken(), vec![phrases::WHAT_TO_PLAY.to_string()]);
    assert_eq!(d.media().state(), SessionState::Absent);
    assert_eq!(driver_launches(), 0);
}

#[tokio::test]
async fn media_search_creates_then_reuses_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let (mut d, voice) = dispatcher(dir.path(), RecordingOpener::default());

    d.dispatch("play despacito song").await.unwrap();
    assert_eq!(d.media().state(), SessionState::Active);
    assert_eq!(
        voice.spoken(),
        vec!["Playing despacito song on YouTube".to_string()]
    );

    d.dispatch("play lo-fi music").await.unwrap();
    assert_eq!(d.media().state(), SessionState::Active);
    assert_eq!(driver_launches(), 1, "active session must be reused");
}

#[tokio::test]
async fn media_failure_apologizes_and_resets_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let (mut d, voice) = dispatcher(dir.path(), RecordingOpener::default());

    d.dispatch("play despacito song").await.unwrap();
    assert_eq!(d.media().state(), SessionState::Active);

    fail_media_wait(true);
    d.dispatch("play another video").await.unwrap();

    assert_eq!(d.media().state(), SessionState::Absent);
    assert_eq!(voice.spoken().last().unwrap(), phrases::PLAY_APOLOGY);

    // The next attempt starts a fresh session
    fail_media_wait(false);
    d.dispatch("play one more song").await.unwrap();
    assert_eq!(d.media().state(), SessionState::Active);
    assert_eq!(driver_launches(), 2);
}

#[tokio::test]
async fn exit_speaks_one_farewell_and_stops_the_loop() {
    let dir = tempfile::tempdir().unwrap();
    let (mut d, voice) = dispatcher(dir.path(), RecordingOpener::default());
    d.start();
    assert!(d.is_running());

    d.dispatch("exit").await.unwrap();

    assert!(!d.is_running());
    assert_eq!(voice.spoken(), vec![phrases::FAREWELL.to_string()]);
}

#[tokio::test]
async fn construction_and_shutdown_both_sweep_stale_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let stale = dir.path().join("vaani_1700000000000_7.mp3");
    std::fs::write(&stale, b"orphaned").unwrap();

    // Construction clears artifacts left by a prior crash
    let (mut d, _voice) = dispatcher(dir.path(), RecordingOpener::default());
    assert_eq!(artifact_count(dir.path()), 0);

    std::fs::write(&stale, b"orphaned again").unwrap();
    d.shutdown().await;
    assert_eq!(artifact_count(dir.path()), 0);
    assert_eq!(d.media().state(), SessionState::Absent);
}

#[tokio::test]
async fn identity_speaks_the_fixed_introduction() {
    let dir = tempfile::tempdir().unwrap();
    let (mut d, voice) = dispatcher(dir.path(), RecordingOpener::default());

    d.dispatch("who are you").await.unwrap();

    assert_eq!(voice.spoken(), vec![phrases::IDENTITY.to_string()]);
}

#[tokio::test]
async fn empty_inference_question_prompts_instead_of_calling() {
    let dir = tempfile::tempdir().unwrap();
    let (mut d, voice) = dispatcher(dir.path(), RecordingOpener::default());

    d.dispatch("ollama").await.unwrap();
    d.dispatch("ollama   ").await.unwrap();

    assert_eq!(
        voice.spoken(),
        vec![
            phrases::ASK_A_QUESTION.to_string(),
            phrases::ASK_A_QUESTION.to_string()
        ]
    );
}
