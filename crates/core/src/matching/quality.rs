//! File quality scoring for files competing over the same slot.
//!
//! Weights are chosen so that language dominates resolution, and resolution
//! dominates size and release type, within realistic ranges.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Czech audio/subtitle markers, matched as plain substrings.
const CZECH_INDICATORS: &[&str] = &[
    "cz", "czech", "čeština", "dabing", "titulky", "tit", "cztit", "cestina",
];

const CZECH_BONUS: u32 = 100;
const FOUR_K_BONUS: u32 = 40;
const MAX_SIZE_BONUS: u64 = 10;
const GIB: u64 = 1024 * 1024 * 1024;

static RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)p").expect("resolution pattern must compile"));

/// Score a file's desirability. Only meaningful relative to other files for
/// the same episode or movie; it says nothing about title relevance.
///
/// `size` is the byte size as reported by the search API; missing or
/// unparsable sizes contribute nothing.
pub fn score_quality(filename: &str, size: Option<&str>) -> u32 {
    let lower = filename.to_lowercase();
    let mut score = 0;

    if CZECH_INDICATORS.iter().any(|indicator| lower.contains(indicator)) {
        score += CZECH_BONUS;
    }

    if let Some(caps) = RESOLUTION.captures(&lower) {
        let height = caps[1].parse::<u64>().unwrap_or(u64::MAX);
        score += resolution_bonus(height);
    }

    // Counted independently of the resolution token, so "2160p 4k" earns both.
    if lower.contains("4k") {
        score += FOUR_K_BONUS;
    }

    score += size_bonus(size);
    score += release_bonus(&lower);

    score
}

fn resolution_bonus(height: u64) -> u32 {
    match height {
        h if h >= 2160 => 40,
        h if h >= 1440 => 35,
        h if h >= 1080 => 30,
        h if h >= 720 => 20,
        h if h >= 480 => 10,
        _ => 5,
    }
}

/// One point per whole GiB, capped.
///
/// Files within the same GiB score alike, so near-size duplicates fall back
/// to arrival order in slot aggregation.
fn size_bonus(size: Option<&str>) -> u32 {
    size.and_then(|s| s.trim().parse::<u64>().ok())
        .map(|bytes| (bytes / GIB).min(MAX_SIZE_BONUS) as u32)
        .unwrap_or(0)
}

fn release_bonus(lower: &str) -> u32 {
    if lower.contains("bluray") || lower.contains("blu-ray") {
        15
    } else if lower.contains("web-dl") {
        10
    } else if lower.contains("webrip") {
        5
    } else {
        0
    }
}
