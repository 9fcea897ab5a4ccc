use std::time::Duration;

use court_roster::{RosterStore, DEFAULT_CACHE_TTL};

use crate::{
    llm::ChatModel, matcher::MATCH_THRESHOLD, roster::PlayerDirectory,
    transcript::TranscriptSource, TranscriptAnalyzer,
};

pub struct TranscriptAnalyzerBuilder<S = (), D = (), T = (), M = ()> {
    store: S,
    directory: D,
    transcripts: T,
    model: M,
    cache_ttl: Duration,
    match_threshold: u8,
}

impl TranscriptAnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            store: (),
            directory: (),
            transcripts: (),
            model: (),
            cache_ttl: DEFAULT_CACHE_TTL,
            match_threshold: MATCH_THRESHOLD,
        }
    }
}

impl Default for TranscriptAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, D, T, M> TranscriptAnalyzerBuilder<S, D, T, M> {
    pub fn store<S2: RosterStore + Send + Sync>(
        self,
        store: S2,
    ) -> TranscriptAnalyzerBuilder<S2, D, T, M> {
        TranscriptAnalyzerBuilder {
            store,
            directory: self.directory,
            transcripts: self.transcripts,
            model: self.model,
            cache_ttl: self.cache_ttl,
            match_threshold: self.match_threshold,
        }
    }

    pub fn directory<D2: PlayerDirectory + Send + Sync>(
        self,
        directory: D2,
    ) -> TranscriptAnalyzerBuilder<S, D2, T, M> {
        TranscriptAnalyzerBuilder {
            store: self.store,
            directory,
            transcripts: self.transcripts,
            model: self.model,
            cache_ttl: self.cache_ttl,
            match_threshold: self.match_threshold,
        }
    }

    pub fn transcripts<T2: TranscriptSource + Send + Sync>(
        self,
        transcripts: T2,
    ) -> TranscriptAnalyzerBuilder<S, D, T2, M> {
        TranscriptAnalyzerBuilder {
            store: self.store,
            directory: self.directory,
            transcripts,
            model: self.model,
            cache_ttl: self.cache_ttl,
            match_threshold: self.match_threshold,
        }
    }

    pub fn model<M2: ChatModel + Send + Sync>(
        self,
        model: M2,
    ) -> TranscriptAnalyzerBuilder<S, D, T, M2> {
        TranscriptAnalyzerBuilder {
            store: self.store,
            directory: self.directory,
            transcripts: self.transcripts,
            model,
            cache_ttl: self.cache_ttl,
            match_threshold: self.match_threshold,
        }
    }

    pub fn cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub fn match_threshold(mut self, match_threshold: u8) -> Self {
        self.match_threshold = match_threshold;
        self
    }
}

impl<S, D, T, M> TranscriptAnalyzerBuilder<S, D, T, M>
where
    S: RosterStore + Send + Sync,
    D: PlayerDirectory + Send + Sync,
    T: TranscriptSource + Send + Sync,
    M: ChatModel + Send + Sync,
{
    pub fn build(self) -> TranscriptAnalyzer<S, D, T, M> {
        TranscriptAnalyzer {
            store: self.store,
            directory: self.directory,
            transcripts: self.transcripts,
            model: self.model,
            cache_ttl: self.cache_ttl,
            match_threshold: self.match_threshold,
        }
    }
}
