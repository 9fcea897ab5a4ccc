pub mod builder;

use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use court_roster::{CachedRoster, RosterStore, Season};

use crate::{
    llm::{session::ChatSession, ChatModel},
    matcher::NameCorrector,
    roster::{PlayerDirectory, Roster, RosterOrigin, RosterPolicy},
    transcript::{clean_transcript, extract_video_id, TranscriptSource},
};

/// A transcript ready to be discussed with the model
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTranscript {
    pub video_id: String,
    pub language_code: String,
    pub is_generated: bool,
    /// Cleaned caption text before any name correction
    pub cleaned: String,
    /// Cleaned text with player names corrected against the roster
    pub text: String,
    pub corrected_words: usize,
}

// Fetches YouTube transcripts, fixes player names and hands them to a chat model
pub struct TranscriptAnalyzer<S, D, T, M>
where
    S: RosterStore + Send + Sync,
    D: PlayerDirectory + Send + Sync,
    T: TranscriptSource + Send + Sync,
    M: ChatModel + Send + Sync,
{
    store: S,
    directory: D,
    transcripts: T,
    model: M,
    cache_ttl: Duration,
    match_threshold: u8,
}

impl<S, D, T, M> TranscriptAnalyzer<S, D, T, M>
where
    S: RosterStore + Send + Sync,
    D: PlayerDirectory + Send + Sync,
    T: TranscriptSource + Send + Sync,
    M: ChatModel + Send + Sync,
{
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Loads the active player roster according to `policy`, refreshing the
    /// on-disk snapshot whenever the stats API is reached.
    #[tracing::instrument(skip(self))]
    pub async fn load_roster(&self, policy: RosterPolicy) -> anyhow::Result<Roster> {
        let now = Utc::now();
        let cached = self.load_cached_roster().await;

        if let Some(cached) = &cached {
            let age = cached.age(now);
            let usable = match policy {
                RosterPolicy::Cached => cached.is_fresh(now, self.cache_ttl),
                RosterPolicy::Offline => true,
                RosterPolicy::Refresh => false,
            };
            if usable {
                tracing::info!(
                    players = cached.players.len(),
                    age_hours = age.as_secs_f64() / 3600.0,
                    "Using cached roster"
                );
                return Ok(Roster::new(cached.players.clone(), RosterOrigin::Cache { age }));
            }
        }

        if policy == RosterPolicy::Offline {
            anyhow::bail!("No cached player roster available for offline use");
        }

        let season = Season::current();
        let fetch_err = match self.directory.fetch_players(&season).await {
            Ok(players) if !players.is_empty() => {
                let snapshot = CachedRoster::new(players);
                if let Err(e) = self.store.save(&snapshot).await {
                    tracing::warn!(error = ?e, "Failed to save roster snapshot");
                }
                return Ok(Roster::new(snapshot.players, RosterOrigin::Fetched));
            }
            Ok(_) => anyhow::anyhow!("Stats API returned no active players for {season}"),
            Err(e) => anyhow::anyhow!("Failed to fetch players for {season}: {e:?}"),
        };
        tracing::error!(error = %fetch_err, "Failed to refresh player roster");

        // a forced refresh still accepts a fresh snapshot, only `Cached` goes stale
        if let Some(cached) = cached {
            let age = cached.age(now);
            let fresh = cached.is_fresh(now, self.cache_ttl);
            match (policy, fresh) {
                (RosterPolicy::Refresh, true) => {
                    tracing::warn!(
                        age_hours = age.as_secs_f64() / 3600.0,
                        "Falling back to cached roster"
                    );
                    return Ok(Roster::new(cached.players, RosterOrigin::Cache { age }));
                }
                (RosterPolicy::Cached, _) => {
                    tracing::warn!(
                        age_hours = age.as_secs_f64() / 3600.0,
                        "Falling back to stale cached roster"
                    );
                    return Ok(Roster::new(cached.players, RosterOrigin::StaleCache { age }));
                }
                _ => {}
            }
        }

        Err(fetch_err.context("No player roster available"))
    }

    async fn load_cached_roster(&self) -> Option<CachedRoster> {
        self.store
            .load()
            .await
            .inspect_err(|e| tracing::warn!(error = ?e, "Failed to load roster cache"))
            .ok()
            .flatten()
            .filter(|roster| !roster.players.is_empty())
    }

    /// Fetches the transcript behind `url` and flattens it without touching
    /// player names
    #[tracing::instrument(skip(self))]
    pub async fn fetch_transcript(&self, url: &str) -> anyhow::Result<PreparedTranscript> {
        let video_id = extract_video_id(url)?;

        let raw = self
            .transcripts
            .fetch(&video_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch transcript: {e:?}"))?;

        let cleaned = clean_transcript(&raw.text());
        if cleaned.is_empty() {
            anyhow::bail!("Transcript for {video_id} is empty");
        }

        Ok(PreparedTranscript {
            video_id,
            language_code: raw.language_code,
            is_generated: raw.is_generated,
            text: cleaned.clone(),
            cleaned,
            corrected_words: 0,
        })
    }

    /// Fetches the transcript behind `url`, flattens it and corrects player
    /// names. Without a roster the cleaned text is returned uncorrected.
    #[tracing::instrument(skip(self, roster))]
    pub async fn prepare_transcript(
        &self,
        url: &str,
        roster: Option<&Roster>,
    ) -> anyhow::Result<PreparedTranscript> {
        let mut transcript = self.fetch_transcript(url).await?;

        match roster.filter(|r| !r.is_empty()) {
            Some(roster) => {
                let correction = NameCorrector::new(roster.names())
                    .with_threshold(self.match_threshold)
                    .correct(&transcript.cleaned);
                transcript.text = correction.text;
                transcript.corrected_words = correction.replaced_words;
            }
            None => tracing::warn!("No player roster loaded, skipping name correction"),
        }

        tracing::info!(
            video_id = %transcript.video_id,
            corrected_words = transcript.corrected_words,
            "Prepared transcript"
        );

        Ok(transcript)
    }

    /// Starts a chat primed with the corrected transcript
    pub fn start_session(&self, transcript: &PreparedTranscript) -> ChatSession<'_, M> {
        ChatSession::new(&self.model, &transcript.text)
    }

    /// Prepares the transcript and answers a single question about it
    pub async fn ask_once(
        &self,
        url: &str,
        roster: Option<&Roster>,
        question: &str,
    ) -> anyhow::Result<String> {
        let transcript = self
            .prepare_transcript(url, roster)
            .await
            .context("Failed to prepare transcript")?;

        self.start_session(&transcript).ask(question).await
    }
}
