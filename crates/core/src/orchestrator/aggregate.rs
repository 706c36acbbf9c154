//! Per-slot best-file selection.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::catalog::{CatalogFile, MovieCatalog, SeriesCatalog};
use crate::matching::{score_quality, EpisodeKey};
use crate::searcher::CandidateFile;

use super::MatchedFile;

/// Tracks the best file seen for a slot.
///
/// A newcomer replaces the occupant only with a strictly higher quality
/// score, so ties keep the earlier (better matching) file.
#[derive(Debug, Default)]
struct Slot<'a> {
    best: Option<(&'a CandidateFile, u32)>,
}

impl<'a> Slot<'a> {
    fn offer(&mut self, file: &'a CandidateFile) {
        let quality = score_quality(&file.name, file.size.as_deref());
        match self.best {
            Some((_, current)) if quality <= current => {}
            _ => self.best = Some((file, quality)),
        }
    }
}

/// Build a series catalog from ranked matches.
///
/// Matches without a detected episode are ignored.
pub fn aggregate_series(title: &str, matches: &[MatchedFile]) -> SeriesCatalog {
    let mut slots: BTreeMap<EpisodeKey, Slot<'_>> = BTreeMap::new();
    for matched in matches {
        if let Some(key) = matched.episode {
            slots.entry(key).or_default().offer(&matched.file);
        }
    }

    let mut seasons: BTreeMap<u32, BTreeMap<u32, CatalogFile>> = BTreeMap::new();
    for (key, slot) in slots {
        if let Some((file, _)) = slot.best {
            seasons
                .entry(key.season)
                .or_default()
                .insert(key.episode, CatalogFile::from(file));
        }
    }

    SeriesCatalog {
        title: title.to_string(),
        last_updated: Utc::now(),
        seasons,
    }
}

/// Pick the single best file for a movie.
pub fn aggregate_movie(title: &str, matches: &[MatchedFile]) -> MovieCatalog {
    let mut slot = Slot::default();
    for matched in matches {
        slot.offer(&matched.file);
    }

    MovieCatalog {
        title: title.to_string(),
        last_updated: Utc::now(),
        file: slot.best.map(|(file, _)| CatalogFile::from(file)),
    }
}
