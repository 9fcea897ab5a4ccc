mod mocks;

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use court_pulse::{
    ChatMessage, PromptTemplate, Role, Roster, RosterOrigin, RosterPolicy, TranscriptAnalyzer,
    TranscriptAnalyzerBuilder,
};
use court_roster::CachedRoster;
use mocks::{
    chat_model::MockChatModel,
    player_directory::{fixture_players, player, MockPlayerDirectory},
    roster_store::MockRosterStore,
    transcript_source::MockTranscriptSource,
};

const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s";
const VIDEO_ID: &str = "dQw4w9WgXcQ";

type Analyzer =
    TranscriptAnalyzer<MockRosterStore, MockPlayerDirectory, MockTranscriptSource, MockChatModel>;

fn build_analyzer(
    store: MockRosterStore,
    directory: MockPlayerDirectory,
    transcripts: MockTranscriptSource,
    model: MockChatModel,
) -> Analyzer {
    TranscriptAnalyzerBuilder::new()
        .store(store)
        .directory(directory)
        .transcripts(transcripts)
        .model(model)
        .build()
}

fn roster_analyzer(store: MockRosterStore, directory: MockPlayerDirectory) -> Analyzer {
    build_analyzer(
        store,
        directory,
        MockTranscriptSource::new(&[]),
        MockChatModel::new("unused"),
    )
}

fn snapshot_aged(hours: i64) -> CachedRoster {
    CachedRoster {
        timestamp: Utc::now() - TimeDelta::hours(hours),
        players: vec![player(1, "Cached Player", "Knicks")],
    }
}

fn fixture_roster() -> Roster {
    Roster::new(fixture_players(), RosterOrigin::Fetched)
}

// ─── Roster loading ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fresh_cache_is_used_without_fetching() {
    let store = MockRosterStore::with_roster(snapshot_aged(2));
    let directory = MockPlayerDirectory::new(fixture_players());
    let directory_calls = directory.calls.clone();

    let roster = roster_analyzer(store, directory)
        .load_roster(RosterPolicy::Cached)
        .await
        .expect("Fresh cache should load");

    assert!(matches!(roster.origin, RosterOrigin::Cache { .. }));
    assert_eq!(roster.names(), vec!["Cached Player"]);
    assert!(
        directory_calls.lock().unwrap().is_empty(),
        "Stats API should not be called while the cache is fresh"
    );
}

#[tokio::test]
async fn test_expired_cache_is_refreshed_and_saved() {
    let store = MockRosterStore::with_roster(snapshot_aged(30));
    let saved = store.saved.clone();
    let directory = MockPlayerDirectory::new(fixture_players());
    let directory_calls = directory.calls.clone();

    let roster = roster_analyzer(store, directory)
        .load_roster(RosterPolicy::Cached)
        .await
        .expect("Roster should be fetched");

    assert_eq!(roster.origin, RosterOrigin::Fetched);
    assert_eq!(roster.len(), 5);
    assert_eq!(directory_calls.lock().unwrap().len(), 1);

    let saved = saved.lock().unwrap();
    assert_eq!(saved.len(), 1, "Fetched roster should be written to the cache");
    assert_eq!(saved[0].players, fixture_players());
}

#[tokio::test]
async fn test_custom_cache_ttl_expires_snapshot_sooner() {
    let store = MockRosterStore::with_roster(snapshot_aged(2));
    let directory = MockPlayerDirectory::new(fixture_players());

    let analyzer = TranscriptAnalyzerBuilder::new()
        .store(store)
        .directory(directory)
        .transcripts(MockTranscriptSource::new(&[]))
        .model(MockChatModel::new("unused"))
        .cache_ttl(Duration::from_secs(60 * 60))
        .build();

    let roster = analyzer.load_roster(RosterPolicy::Cached).await.unwrap();

    assert_eq!(roster.origin, RosterOrigin::Fetched);
}

#[tokio::test]
async fn test_fetch_failure_falls_back_to_stale_cache() {
    let store = MockRosterStore::with_roster(snapshot_aged(72));
    let directory = MockPlayerDirectory::failing("stats.nba.com timed out");

    let roster = roster_analyzer(store, directory)
        .load_roster(RosterPolicy::Cached)
        .await
        .expect("Stale cache should be used when the API is down");

    match roster.origin {
        RosterOrigin::StaleCache { age } => assert!(age >= Duration::from_secs(71 * 3600)),
        other => panic!("Expected stale cache origin, got {other:?}"),
    }
    assert_eq!(roster.names(), vec!["Cached Player"]);
}

#[tokio::test]
async fn test_fetch_failure_without_cache_is_error() {
    let directory = MockPlayerDirectory::failing("stats.nba.com timed out");

    let result = roster_analyzer(MockRosterStore::default(), directory)
        .load_roster(RosterPolicy::Cached)
        .await;

    let err = result.expect_err("No roster should be available");
    assert!(format!("{err:#}").contains("stats.nba.com timed out"));
}

#[tokio::test]
async fn test_empty_fetch_is_treated_as_failure() {
    let store = MockRosterStore::with_roster(snapshot_aged(48));
    let saved = store.saved.clone();

    let roster = roster_analyzer(store, MockPlayerDirectory::new(Vec::new()))
        .load_roster(RosterPolicy::Cached)
        .await
        .unwrap();

    assert!(matches!(roster.origin, RosterOrigin::StaleCache { .. }));
    assert!(
        saved.lock().unwrap().is_empty(),
        "An empty roster must not overwrite the cache"
    );
}

#[tokio::test]
async fn test_refresh_ignores_fresh_cache() {
    let store = MockRosterStore::with_roster(snapshot_aged(1));
    let directory = MockPlayerDirectory::new(fixture_players());
    let directory_calls = directory.calls.clone();

    let roster = roster_analyzer(store, directory)
        .load_roster(RosterPolicy::Refresh)
        .await
        .unwrap();

    assert_eq!(roster.origin, RosterOrigin::Fetched);
    assert_eq!(directory_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_refresh_failure_falls_back_to_fresh_cache() {
    let store = MockRosterStore::with_roster(snapshot_aged(1));
    let directory = MockPlayerDirectory::failing("403 Forbidden");
    let directory_calls = directory.calls.clone();

    let roster = roster_analyzer(store, directory)
        .load_roster(RosterPolicy::Refresh)
        .await
        .expect("A fresh snapshot should cover a failed refresh");

    assert!(matches!(roster.origin, RosterOrigin::Cache { .. }));
    assert_eq!(roster.names(), vec!["Cached Player"]);
    assert_eq!(directory_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_refresh_failure_with_stale_cache_is_error() {
    let store = MockRosterStore::with_roster(snapshot_aged(48));
    let directory = MockPlayerDirectory::failing("403 Forbidden");

    let result = roster_analyzer(store, directory)
        .load_roster(RosterPolicy::Refresh)
        .await;

    let err = result.expect_err("Refresh must not fall back to a stale snapshot");
    assert!(format!("{err:#}").contains("403 Forbidden"));
}

#[tokio::test]
async fn test_offline_accepts_any_cache_age() {
    let store = MockRosterStore::with_roster(snapshot_aged(24 * 30));
    let directory = MockPlayerDirectory::new(fixture_players());
    let directory_calls = directory.calls.clone();

    let roster = roster_analyzer(store, directory)
        .load_roster(RosterPolicy::Offline)
        .await
        .unwrap();

    assert!(matches!(roster.origin, RosterOrigin::Cache { .. }));
    assert!(directory_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_offline_without_cache_is_error() {
    let directory = MockPlayerDirectory::new(fixture_players());
    let directory_calls = directory.calls.clone();

    let result = roster_analyzer(MockRosterStore::default(), directory)
        .load_roster(RosterPolicy::Offline)
        .await;

    assert!(result.is_err());
    assert!(directory_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cache_save_failure_still_returns_roster() {
    let store = MockRosterStore::failing_save("disk full");

    let roster = roster_analyzer(store, MockPlayerDirectory::new(fixture_players()))
        .load_roster(RosterPolicy::Cached)
        .await
        .expect("Save failures should only be logged");

    assert_eq!(roster.origin, RosterOrigin::Fetched);
}

// ─── Transcript preparation ──────────────────────────────────────────────────

#[tokio::test]
async fn test_prepare_transcript_corrects_player_names() {
    let transcripts = MockTranscriptSource::new(&[
        "  Davis scored   thirty",
        "and Curry hit seven threes",
    ]);
    let transcript_calls = transcripts.calls.clone();

    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        transcripts,
        MockChatModel::new("unused"),
    );

    let prepared = analyzer
        .prepare_transcript(VIDEO_URL, Some(&fixture_roster()))
        .await
        .expect("Transcript should be prepared");

    assert_eq!(prepared.video_id, VIDEO_ID);
    assert_eq!(prepared.language_code, "en");
    assert_eq!(
        prepared.cleaned,
        "Davis scored thirty and Curry hit seven threes"
    );
    assert_eq!(
        prepared.text,
        "Anthony Davis scored thirty and Stephen Curry hit seven threes"
    );
    assert_eq!(prepared.corrected_words, 2);
    assert_eq!(*transcript_calls.lock().unwrap(), vec![VIDEO_ID.to_string()]);
}

#[tokio::test]
async fn test_prepare_transcript_without_roster_skips_correction() {
    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        MockTranscriptSource::new(&["Jokic posted another triple double"]),
        MockChatModel::new("unused"),
    );

    let prepared = analyzer.prepare_transcript(VIDEO_ID, None).await.unwrap();

    assert_eq!(prepared.text, prepared.cleaned);
    assert_eq!(prepared.corrected_words, 0);
}

#[tokio::test]
async fn test_fetch_transcript_leaves_names_alone() {
    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(fixture_players()),
        MockTranscriptSource::new(&["Davis   is questionable"]),
        MockChatModel::new("unused"),
    );

    let fetched = analyzer.fetch_transcript(VIDEO_URL).await.unwrap();

    assert_eq!(fetched.video_id, VIDEO_ID);
    assert_eq!(fetched.cleaned, "Davis is questionable");
    assert_eq!(fetched.text, fetched.cleaned);
    assert_eq!(fetched.corrected_words, 0);
}

#[tokio::test]
async fn test_prepare_transcript_rejects_invalid_url() {
    let transcripts = MockTranscriptSource::new(&["anything"]);
    let transcript_calls = transcripts.calls.clone();

    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        transcripts,
        MockChatModel::new("unused"),
    );

    let result = analyzer
        .prepare_transcript("https://vimeo.com/12345", None)
        .await;

    assert!(result.is_err());
    assert!(transcript_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_prepare_transcript_propagates_fetch_failure() {
    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        MockTranscriptSource::failing("Subtitles are disabled for this video"),
        MockChatModel::new("unused"),
    );

    let err = analyzer
        .prepare_transcript(VIDEO_URL, None)
        .await
        .expect_err("Fetch failure should be an error");

    assert!(err.to_string().contains("Subtitles are disabled"));
}

#[tokio::test]
async fn test_prepare_transcript_rejects_empty_captions() {
    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        MockTranscriptSource::new(&["  ", "\n"]),
        MockChatModel::new("unused"),
    );

    assert!(analyzer.prepare_transcript(VIDEO_URL, None).await.is_err());
}

// ─── Chat sessions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_is_primed_with_corrected_transcript() {
    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        MockTranscriptSource::new(&["grab Wembanyama off waivers"]),
        MockChatModel::new("answer"),
    );
    let prepared = analyzer
        .prepare_transcript(VIDEO_URL, Some(&fixture_roster()))
        .await
        .unwrap();

    let session = analyzer.start_session(&prepared);

    assert_eq!(
        session.history(),
        &[
            ChatMessage::user(
                "This is the transcript of a YouTube video:\n\ngrab Victor Wembanyama off waivers"
            ),
            ChatMessage::model(
                "Okay, I understand. I have the context from the transcript. Ask me anything about it."
            ),
        ]
    );
    assert_eq!(session.last(), None);
}

#[tokio::test]
async fn test_session_replays_history_on_each_question() {
    let model = MockChatModel::new("answer");
    let model_calls = model.calls.clone();
    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        MockTranscriptSource::new(&["injury report"]),
        model,
    );
    let prepared = analyzer.prepare_transcript(VIDEO_URL, None).await.unwrap();
    let mut session = analyzer.start_session(&prepared);

    let first = session
        .ask(PromptTemplate::InjuryUpdates.text())
        .await
        .unwrap();
    let second = session.ask("who is out tonight?").await.unwrap();

    assert_eq!(first, "answer #1");
    assert_eq!(second, "answer #2");
    assert_eq!(session.last(), Some("answer #2"));
    assert_eq!(session.history().len(), 6);

    let calls = model_calls.lock().unwrap();
    assert_eq!(calls[0].len(), 3);
    assert_eq!(calls[1].len(), 5);
    assert_eq!(calls[1][3], ChatMessage::model("answer #1"));
    let last = calls[1].last().unwrap();
    assert_eq!(last.role, Role::User);
    assert_eq!(last.text, "who is out tonight?");
}

#[tokio::test]
async fn test_failed_question_leaves_history_untouched() {
    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        MockTranscriptSource::new(&["strategy talk"]),
        MockChatModel::failing("quota exceeded"),
    );
    let prepared = analyzer.prepare_transcript(VIDEO_URL, None).await.unwrap();
    let mut session = analyzer.start_session(&prepared);

    let err = session.ask("should I punt assists?").await.unwrap_err();

    assert!(err.to_string().contains("quota exceeded"));
    assert_eq!(session.history().len(), 2);
    assert_eq!(session.last(), None);
}

#[tokio::test]
async fn test_ask_once_prepares_and_answers() {
    let model = MockChatModel::new("Pick up Stephen Curry");
    let model_calls = model.calls.clone();
    let analyzer = build_analyzer(
        MockRosterStore::default(),
        MockPlayerDirectory::new(Vec::new()),
        MockTranscriptSource::new(&["Curry is back from injury"]),
        model,
    );

    let answer = analyzer
        .ask_once(
            VIDEO_URL,
            Some(&fixture_roster()),
            PromptTemplate::WaiverWire.text(),
        )
        .await
        .unwrap();

    assert_eq!(answer, "Pick up Stephen Curry #1");
    let calls = model_calls.lock().unwrap();
    assert!(calls[0][0].text.ends_with("Stephen Curry is back from injury"));
}
