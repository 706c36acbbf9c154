use serde::Serialize;

use crate::matching::{EpisodeKey, MatchTier};
use crate::searcher::CandidateFile;

/// A candidate that passed the title match floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedFile {
    pub file: CandidateFile,
    pub tier: MatchTier,
    /// Detected episode; always set for series candidates that reach
    /// aggregation, never for movies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<EpisodeKey>,
}

impl MatchedFile {
    pub fn score(&self) -> u8 {
        self.tier.score()
    }
}

/// Counters describing one search run, logged on completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Query variants issued.
    pub queries: usize,
    /// Pages fetched successfully.
    pub pages: usize,
    /// Pages abandoned after a transport failure.
    pub failed_pages: usize,
    /// Distinct candidates after deduplication.
    pub candidates: usize,
    /// Candidates that matched the title (and resolved an episode, for series).
    pub matched: usize,
    /// Slots filled in the resulting catalog.
    pub slots: usize,
}

/// Which kind of catalog a search produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Series,
    Movie,
}

impl SearchKind {
    /// Label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Series => "series",
            SearchKind::Movie => "movie",
        }
    }
}
