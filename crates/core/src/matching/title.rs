//! Title matching and match-confidence scoring.
//!
//! The remote search is keyword-only and returns plenty of noise for short
//! titles ("Grain Silos of America" for "Silo"). A loose containment test
//! decides membership; positional tiers on top of it rank how confident we
//! are that a filename really belongs to the requested title.

use std::sync::Arc;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::normalize::normalize;
use super::patterns::{word_boundary_source, PatternCache};

/// Match confidence tier, ordered from no match to exact prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Not a match; the candidate is discarded.
    None,
    /// Title words present somewhere in the filename.
    Loose,
    /// Title as a whole word followed by a season marker or a year.
    Marker,
    /// Title at the start, followed by a separator.
    NearStart,
    /// Filename starts with the title.
    Prefix,
}

impl MatchTier {
    /// Numeric score of the tier (0, 50, 80, 90 or 100).
    pub fn score(self) -> u8 {
        match self {
            MatchTier::None => 0,
            MatchTier::Loose => 50,
            MatchTier::Marker => 80,
            MatchTier::NearStart => 90,
            MatchTier::Prefix => 100,
        }
    }
}

/// Decides whether filenames belong to a title and how confidently.
///
/// Whole-word patterns are memoized per word in a bounded [`PatternCache`];
/// positional patterns belong to a [`TitlePattern`] and live only as long as
/// it does. Cloning the matcher shares the memo.
#[derive(Debug, Clone, Default)]
pub struct TitleMatcher {
    patterns: Arc<PatternCache>,
}

impl TitleMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher that shares an existing pattern memo.
    pub fn with_cache(patterns: Arc<PatternCache>) -> Self {
        Self { patterns }
    }

    /// The pattern memo backing this matcher.
    pub fn cache(&self) -> &PatternCache {
        &self.patterns
    }

    /// Loose membership test.
    ///
    /// A single-word title must appear as a whole word. For multi-word
    /// titles every word must appear somewhere in the filename, in any order
    /// and not necessarily as whole words, which tolerates the separator
    /// soup of release names.
    pub fn is_match(&self, filename: &str, title: &str) -> bool {
        let norm_fn = normalize(filename);
        let norm_title = normalize(title);
        self.is_match_normalized(&norm_fn, &norm_title)
    }

    fn is_match_normalized(&self, norm_fn: &str, norm_title: &str) -> bool {
        let words: Vec<&str> = norm_title.split_whitespace().collect();
        match words.as_slice() {
            [] => false,
            [word] => self
                .patterns
                .get(&word_boundary_source(word))
                .is_some_and(|re| re.is_match(norm_fn)),
            _ => words.iter().all(|word| norm_fn.contains(word)),
        }
    }

    /// Compile the positional patterns for `title`, once per search.
    pub fn compile(&self, title: &str) -> TitlePattern<'_> {
        let norm_title = normalize(title);
        let escaped = regex_lite::escape(&norm_title);

        TitlePattern {
            matcher: self,
            near_start: compile_positional(&format!(r"^\s*{}[\s._\-]", escaped)),
            marker: compile_positional(&format!(
                r"(?:^| ){}[\s._\-]+(?:s\d+|season|\d{{4}})",
                escaped
            )),
            norm_title,
        }
    }

    /// Classify a filename into a [`MatchTier`]. The first matching tier wins.
    ///
    /// Compiles the title's patterns on every call; ranking many files
    /// against one title should go through [`TitleMatcher::compile`].
    pub fn tier(&self, filename: &str, title: &str) -> MatchTier {
        self.compile(title).tier(filename)
    }

    /// Score how confidently a filename belongs to a title: 0, 50, 80, 90 or 100.
    pub fn score_match(&self, filename: &str, title: &str) -> u8 {
        self.tier(filename, title).score()
    }
}

fn compile_positional(source: &str) -> Option<Regex> {
    match Regex::new(source) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(pattern = source, error = %e, "Failed to compile title pattern");
            None
        }
    }
}

/// A title with its positional patterns compiled, ready to classify many
/// filenames.
#[derive(Debug)]
pub struct TitlePattern<'a> {
    matcher: &'a TitleMatcher,
    norm_title: String,
    near_start: Option<Regex>,
    marker: Option<Regex>,
}

impl TitlePattern<'_> {
    /// Classify a filename into a [`MatchTier`]. The first matching tier wins.
    pub fn tier(&self, filename: &str) -> MatchTier {
        if self.norm_title.is_empty() {
            return MatchTier::None;
        }

        let norm_fn = normalize(filename);

        if norm_fn.starts_with(&self.norm_title) {
            return MatchTier::Prefix;
        }

        if matches(&self.near_start, &norm_fn) {
            return MatchTier::NearStart;
        }

        if matches(&self.marker, &norm_fn) {
            return MatchTier::Marker;
        }

        if self.matcher.is_match_normalized(&norm_fn, &self.norm_title) {
            return MatchTier::Loose;
        }

        MatchTier::None
    }
}

fn matches(pattern: &Option<Regex>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word_requires_whole_word() {
        let matcher = TitleMatcher::new();
        assert!(matcher.is_match("Silo.S01E01.720p", "Silo"));
        assert!(matcher.is_match("The.Silo.S01E01", "silo"));
        assert!(!matcher.is_match("Grain Silos of America", "Silo"));
        assert!(!matcher.is_match("Prison.Isolation.Ward", "Silo"));
    }

    #[test]
    fn test_multi_word_is_order_free_containment() {
        let matcher = TitleMatcher::new();
        assert!(matcher.is_match("Breaking.Bad.S01E01", "Breaking Bad"));
        assert!(matcher.is_match("Bad-Breaking-S01E01", "Breaking Bad"));
        assert!(matcher.is_match("breaking_badly_s01e01", "Breaking Bad"));
        assert!(!matcher.is_match("Breaking.News.S01E01", "Breaking Bad"));
    }

    #[test]
    fn test_empty_title_never_matches() {
        let matcher = TitleMatcher::new();
        assert!(!matcher.is_match("anything.mkv", ""));
        assert!(!matcher.is_match("anything.mkv", " -- "));
        assert_eq!(matcher.score_match("anything.mkv", ""), 0);
    }

    #[test]
    fn test_score_tiers_single_word() {
        let matcher = TitleMatcher::new();
        let cases = [
            ("Silo.S01E01.720p.WEB-DL.x264", 100),
            ("Silo S01E01 1080p BluRay x264", 100),
            ("The.Silo.S01E01.720p", 80),
            ("The Silo Season 1 Episode 1", 80),
            ("Watch.Silo.2023.S01E01", 80),
            ("Movie.About.Silo.Building.S01E01", 50),
            ("Missile.Silo.Documentary", 50),
            ("Grain.Silos.of.America", 0),
            ("Prison.Isolation.Ward", 0),
        ];
        for (filename, expected) in cases {
            assert_eq!(
                matcher.score_match(filename, "Silo"),
                expected,
                "unexpected score for {}",
                filename
            );
        }
    }

    #[test]
    fn test_score_tiers_multi_word() {
        let matcher = TitleMatcher::new();
        assert_eq!(matcher.score_match("Breaking.Bad.S01E01.720p", "Breaking Bad"), 100);
        assert_eq!(matcher.score_match("The.Breaking.Bad.S01E01", "Breaking Bad"), 80);
        assert_eq!(matcher.score_match("The.Breaking.Bad.2008", "Breaking Bad"), 80);
        assert_eq!(matcher.score_match("Bad.Breaking.S01E01", "Breaking Bad"), 50);
        assert_eq!(matcher.score_match("Breaking.News.S01E01", "Breaking Bad"), 0);
    }

    #[test]
    fn test_prefix_tier_ignores_word_boundary() {
        // The prefix tier is a plain string prefix test on normalized text.
        let matcher = TitleMatcher::new();
        assert_eq!(matcher.tier("Silos.Of.America", "Silo"), MatchTier::Prefix);
        assert!(!matcher.is_match("Silos.Of.America", "Silo"));
    }

    #[test]
    fn test_marker_requires_separator() {
        let matcher = TitleMatcher::new();
        // "silos01" has no boundary after the title, and no loose match either.
        assert_eq!(matcher.score_match("the silos01", "Silo"), 0);
    }

    #[test]
    fn test_score_is_deterministic() {
        let matcher = TitleMatcher::new();
        let first = matcher.score_match("The.Silo.S01E01.720p", "Silo");
        for _ in 0..10 {
            assert_eq!(matcher.score_match("The.Silo.S01E01.720p", "Silo"), first);
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(MatchTier::Prefix > MatchTier::NearStart);
        assert!(MatchTier::NearStart > MatchTier::Marker);
        assert!(MatchTier::Marker > MatchTier::Loose);
        assert!(MatchTier::Loose > MatchTier::None);
        assert_eq!(MatchTier::None.score(), 0);
        assert_eq!(MatchTier::Prefix.score(), 100);
    }

    #[test]
    fn test_word_patterns_are_memoized() {
        let matcher = TitleMatcher::new();
        matcher.score_match("Missile.Silo.Documentary", "Silo");
        assert_eq!(matcher.cache().len(), 1);

        matcher.score_match("Another.Missile.Silo", "Silo");
        assert_eq!(matcher.cache().len(), 1);
    }

    #[test]
    fn test_title_patterns_stay_out_of_memo() {
        let matcher = TitleMatcher::new();
        for i in 0..50 {
            let title = format!("Show {}", i);
            let pattern = matcher.compile(&title);
            assert_eq!(
                pattern.tier(&format!("The.Show.{}.S01E01", i)),
                MatchTier::Marker
            );
        }
        // Multi-word titles never need a word pattern; positional ones are
        // dropped with their TitlePattern.
        assert!(matcher.cache().is_empty());
    }

    #[test]
    fn test_compiled_pattern_agrees_with_tier() {
        let matcher = TitleMatcher::new();
        let pattern = matcher.compile("Silo");
        for filename in [
            "Silo.S01E01.720p",
            "The.Silo.S01E01.720p",
            "Missile.Silo.Documentary",
            "Grain.Silos.of.America",
        ] {
            assert_eq!(pattern.tier(filename), matcher.tier(filename, "Silo"));
        }
    }

    #[test]
    fn test_clones_share_cache() {
        let matcher = TitleMatcher::new();
        let clone = matcher.clone();
        clone.score_match("Missile.Silo.Documentary", "Silo");
        assert_eq!(matcher.cache().len(), 1);
        assert_eq!(matcher.cache().len(), clone.cache().len());
    }
}
