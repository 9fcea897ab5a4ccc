pub mod analyzer;
mod error;
mod llm;
pub mod matcher;
pub mod parser;
pub mod roster;
pub mod tracing;
pub mod transcript;
pub mod types;

pub use analyzer::{builder::TranscriptAnalyzerBuilder, PreparedTranscript, TranscriptAnalyzer};
pub use error::Error;
pub use llm::{
    gemini::{self, GeminiClient, GeminiError},
    prompts::{resolve_question, PromptTemplate},
    session::ChatSession,
    ChatMessage, ChatModel, Role,
};
pub use roster::{
    nba_stats::{NbaStatsClient, NbaStatsError},
    PlayerDirectory, Roster, RosterOrigin, RosterPolicy,
};
pub use transcript::{
    youtube::YouTubeTranscripts, RawTranscript, TranscriptError, TranscriptSource,
};
