//! Catalog records and store types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::searcher::CandidateFile;

/// The stored form of a chosen file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub name: String,
    pub ident: String,
    /// Size in bytes as reported by the search API; "0" when unknown.
    #[serde(default = "default_size")]
    pub size: String,
}

fn default_size() -> String {
    "0".to_string()
}

impl From<&CandidateFile> for CatalogFile {
    fn from(file: &CandidateFile) -> Self {
        Self {
            name: file.name.clone(),
            ident: file.ident.clone(),
            size: file.size.clone().unwrap_or_else(default_size),
        }
    }
}

/// Best file per episode of a series.
///
/// Seasons and episodes are keyed by number; in JSON the keys are the
/// decimal strings (`{"1": {"1": {...}}}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesCatalog {
    pub title: String,
    pub last_updated: DateTime<Utc>,
    pub seasons: BTreeMap<u32, BTreeMap<u32, CatalogFile>>,
}

impl SeriesCatalog {
    /// An empty catalog stamped with the current time.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            last_updated: Utc::now(),
            seasons: BTreeMap::new(),
        }
    }

    pub fn episode(&self, season: u32, episode: u32) -> Option<&CatalogFile> {
        self.seasons.get(&season)?.get(&episode)
    }

    pub fn season_numbers(&self) -> Vec<u32> {
        self.seasons.keys().copied().collect()
    }

    pub fn episode_count(&self) -> usize {
        self.seasons.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.episode_count() == 0
    }
}

/// Best file for a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieCatalog {
    pub title: String,
    pub last_updated: DateTime<Utc>,
    pub file: Option<CatalogFile>,
}

impl MovieCatalog {
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            last_updated: Utc::now(),
            file: None,
        }
    }
}

/// Either kind of stored record.
///
/// Serialized without a tag; a record with `seasons` is a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Catalog {
    Series(SeriesCatalog),
    Movie(MovieCatalog),
}

// Dispatches on the `seasons` key by hand: serde's untagged buffering cannot
// read numeric map keys back from JSON strings.
impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let catalog = if value.get("seasons").is_some() {
            serde_json::from_value(value).map(Catalog::Series)
        } else {
            serde_json::from_value(value).map(Catalog::Movie)
        };
        catalog.map_err(serde::de::Error::custom)
    }
}

impl Catalog {
    pub fn title(&self) -> &str {
        match self {
            Catalog::Series(s) => &s.title,
            Catalog::Movie(m) => &m.title,
        }
    }

    pub fn into_series(self) -> Option<SeriesCatalog> {
        match self {
            Catalog::Series(s) => Some(s),
            Catalog::Movie(_) => None,
        }
    }

    pub fn into_movie(self) -> Option<MovieCatalog> {
        match self {
            Catalog::Movie(m) => Some(m),
            Catalog::Series(_) => None,
        }
    }
}

impl From<SeriesCatalog> for Catalog {
    fn from(catalog: SeriesCatalog) -> Self {
        Catalog::Series(catalog)
    }
}

impl From<MovieCatalog> for Catalog {
    fn from(catalog: MovieCatalog) -> Self {
        Catalog::Movie(catalog)
    }
}

/// A stored record as reported by `list_all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display title recovered from the slug.
    pub title: String,
    pub slug: String,
    /// Name of the backing record (e.g. "silo.json").
    pub file_name: String,
    pub modified: DateTime<Utc>,
}

/// Errors from catalog storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Title '{0}' has no usable storage key")]
    InvalidTitle(String),

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Failed to serialize catalog: {0}")]
    Serialize(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

/// Storage key for a title.
///
/// Characters other than alphanumerics, `_`, `-`, `.` and space become `_`;
/// the result is lower-cased and spaces become `_`.
pub fn slugify(title: &str) -> String {
    title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ' ') {
                c
            } else {
                '_'
            }
        })
        .flat_map(char::to_lowercase)
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Display title for a slug: underscores read back as spaces.
pub fn title_from_slug(slug: &str) -> String {
    slug.replace('_', " ")
}
