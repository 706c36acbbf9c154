//! Season/episode detection from release filenames.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::normalize::normalize;

/// A detected (season, episode) pair. Both numbers are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EpisodeKey {
    pub season: u32,
    pub episode: u32,
}

impl EpisodeKey {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl std::fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}

/// How a cascade pattern's captures map onto an [`EpisodeKey`].
#[derive(Debug, Clone, Copy)]
enum Extraction {
    /// Group 1 is the season, group 2 the episode.
    SeasonEpisode,
    /// Group 1 is the episode; the season is assumed to be 1.
    EpisodeOnly,
}

struct EpisodePattern {
    regex: Regex,
    extraction: Extraction,
}

impl EpisodePattern {
    fn new(source: &str, extraction: Extraction) -> Self {
        Self {
            regex: Regex::new(source).expect("episode pattern must compile"),
            extraction,
        }
    }

    fn extract(&self, caps: &Captures<'_>) -> Option<EpisodeKey> {
        match self.extraction {
            Extraction::SeasonEpisode => {
                let season = parse_number(caps.get(1)?.as_str())?;
                let episode = parse_number(caps.get(2)?.as_str())?;
                Some(EpisodeKey::new(season, episode))
            }
            Extraction::EpisodeOnly => {
                let episode = parse_number(caps.get(1)?.as_str())?;
                Some(EpisodeKey::new(1, episode))
            }
        }
    }
}

/// Ordered cascade; earlier, more specific patterns shadow the looser ones
/// below them. Input is normalized (lower-case) text.
static EPISODE_PATTERNS: Lazy<Vec<EpisodePattern>> = Lazy::new(|| {
    vec![
        // s01e01
        EpisodePattern::new(r"s(\d+)e(\d+)", Extraction::SeasonEpisode),
        // 1x01
        EpisodePattern::new(r"(\d+)x(\d+)", Extraction::SeasonEpisode),
        // episode 5
        EpisodePattern::new(r"episode\s*(\d+)", Extraction::EpisodeOnly),
        // ep 5
        EpisodePattern::new(r"ep\s*(\d+)", Extraction::EpisodeOnly),
        // e5
        EpisodePattern::new(r"e(\d+)", Extraction::EpisodeOnly),
        // 1.01
        EpisodePattern::new(r"(\d+)\.\s*(\d+)", Extraction::SeasonEpisode),
    ]
});

static SEASON_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"season\s*(\d+)").expect("season pattern must compile"));

/// Parse a base-10 number; zero and overflow are rejected.
fn parse_number(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n >= 1)
}

/// Strip every whole-word occurrence of the title's words from a normalized
/// filename, leaving the region that carries season/episode tokens.
fn strip_title_words(norm_fn: &str, norm_title: &str) -> String {
    let title_words: HashSet<&str> = norm_title.split_whitespace().collect();
    norm_fn
        .split_whitespace()
        .filter(|token| !title_words.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Detect the season and episode a filename refers to.
///
/// Returns `None` when nothing recognizable is found; such files must not
/// take part in per-episode aggregation.
pub fn detect_episode(filename: &str, title: &str) -> Option<EpisodeKey> {
    let cleaned = strip_title_words(&normalize(filename), &normalize(title));

    for pattern in EPISODE_PATTERNS.iter() {
        // The first pattern that matches decides. Unusable numbers (zero,
        // overflow) mean no episode, never a retry with a looser pattern.
        if let Some(caps) = pattern.regex.captures(&cleaned) {
            return pattern.extract(&caps);
        }
    }

    detect_from_season_word(&cleaned)
}

/// Fallback for names like "season 2 dil 3": the season comes from the
/// `season N` token and the episode from the first standalone number left
/// once that token is removed.
fn detect_from_season_word(cleaned: &str) -> Option<EpisodeKey> {
    if !cleaned.contains("season") && !cleaned.contains("serie") {
        return None;
    }

    let caps = SEASON_TOKEN.captures(cleaned)?;
    let season = parse_number(caps.get(1)?.as_str())?;
    let remainder = cleaned.replace(caps.get(0)?.as_str(), " ");

    let episode = remainder
        .split_whitespace()
        .filter(|token| token.chars().all(|c| c.is_ascii_digit()))
        .find_map(parse_number)?;

    Some(EpisodeKey::new(season, episode))
}
