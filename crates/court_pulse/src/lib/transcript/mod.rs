pub mod cleaner;
pub mod video_id;
pub mod youtube;

use std::{fmt::Debug, future::Future};

pub use cleaner::clean_transcript;
pub use video_id::extract_video_id;

pub trait TranscriptSource {
    type Error: Debug;

    fn fetch(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<RawTranscript, Self::Error>> + Send;
}

/// Caption lines of a single video, as returned by the transcript provider
#[derive(Debug, Clone, PartialEq)]
pub struct RawTranscript {
    pub video_id: String,
    pub language_code: String,
    pub is_generated: bool,
    pub lines: Vec<String>,
}

impl RawTranscript {
    /// Plain-text rendering: one caption line per row, no timestamps
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("No transcript found for this video ({video_id}): {reason}")]
    Unavailable { video_id: String, reason: String },

    #[error("Failed to initialise transcript client: {0}")]
    Client(String),
}
