//! Title matching engine.
//!
//! Pure, stateless stages applied to every search candidate:
//! - **normalize**: canonical text form used for all comparisons
//! - **title**: membership test and match-confidence tiers
//! - **episode**: (season, episode) detection
//! - **quality**: tie-breaking between files for the same slot
//! - **query_builder**: expansion of a title into search queries
//!
//! The only shared state is the bounded whole-word pattern memo inside
//! [`TitleMatcher`].

mod episode;
mod normalize;
mod patterns;
mod quality;
mod query_builder;
mod title;

pub use episode::{detect_episode, EpisodeKey};
pub use normalize::normalize;
pub use patterns::PatternCache;
pub use quality::score_quality;
pub use query_builder::{build_queries, QueryBuilder};
pub use title::{MatchTier, TitleMatcher, TitlePattern};
