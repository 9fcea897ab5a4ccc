use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::transcript::{RawTranscript, TranscriptError, TranscriptSource};

/// Caption track fetcher backed by YouTube's public transcript endpoints
pub struct YouTubeTranscripts {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
}

impl YouTubeTranscripts {
    pub const DEFAULT_LANGUAGES: &[&str] = &["en"];

    pub fn new(languages: Vec<String>) -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to build transcript client"))
            .map_err(|e| TranscriptError::Client(e.to_string()))?;

        let languages = if languages.is_empty() {
            Self::DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
        } else {
            languages
        };

        Ok(Self { api, languages })
    }
}

impl TranscriptSource for YouTubeTranscripts {
    type Error = TranscriptError;

    #[tracing::instrument(skip(self), fields(languages = ?self.languages))]
    async fn fetch(&self, video_id: &str) -> Result<RawTranscript, Self::Error> {
        let languages = self.languages.iter().map(String::as_str).collect::<Vec<_>>();

        let transcript = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to fetch transcript"))
            .map_err(|e| TranscriptError::Unavailable {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(
            language = %transcript.language_code,
            generated = transcript.is_generated,
            snippets = transcript.snippets.len(),
            "Fetched transcript"
        );

        Ok(RawTranscript {
            video_id: transcript.video_id.clone(),
            language_code: transcript.language_code.clone(),
            is_generated: transcript.is_generated,
            lines: transcript
                .snippets
                .iter()
                .map(|snippet| snippet.text.clone())
                .collect(),
        })
    }
}
