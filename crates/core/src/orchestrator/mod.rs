//! Search orchestration.
//!
//! The orchestrator is the only part of the engine with I/O: it expands a
//! title into queries, pages through the remote search for each, and feeds
//! the deduplicated candidates through matching, episode detection and
//! quality ranking before persisting the resulting catalog.

mod aggregate;
mod runner;
mod types;

pub use aggregate::{aggregate_movie, aggregate_series};
pub use runner::SearchOrchestrator;
pub use types::{MatchedFile, SearchKind, SearchStats};

