//! Catalog store backed by one pretty-printed JSON file per title.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{slugify, title_from_slug, Catalog, CatalogEntry, CatalogStore, StoreError};

const EXTENSION: &str = "json";

/// Directory of `<slug>.json` records.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    dir: PathBuf,
}

impl JsonCatalogStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, title: &str) -> Option<PathBuf> {
        let slug = slugify(title);
        if slug.is_empty() {
            return None;
        }
        Some(self.dir.join(format!("{}.{}", slug, EXTENSION)))
    }
}

impl CatalogStore for JsonCatalogStore {
    fn save(&self, title: &str, catalog: &Catalog) -> Result<(), StoreError> {
        let path = self
            .record_path(title)
            .ok_or_else(|| StoreError::InvalidTitle(title.to_string()))?;

        let body = serde_json::to_vec_pretty(catalog)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        // Readers only ever see the old record or the complete new one.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error.to_string()))?;

        debug!(path = %path.display(), "Saved catalog");
        Ok(())
    }

    fn load(&self, title: &str) -> Option<Catalog> {
        let path = self.record_path(title)?;

        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read catalog");
                return None;
            }
        };

        match serde_json::from_str(&body) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt catalog");
                None
            }
        }
    }

    fn remove(&self, title: &str) -> bool {
        let Some(path) = self.record_path(title) else {
            return false;
        };
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to remove catalog");
                false
            }
        }
    }

    fn list_all(&self) -> Vec<CatalogEntry> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "Failed to list catalogs");
                return Vec::new();
            }
        };

        let mut listed: Vec<CatalogEntry> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                    return None;
                }
                let slug = path.file_stem()?.to_str()?.to_string();
                let modified = entry.metadata().ok()?.modified().ok()?;
                Some(CatalogEntry {
                    title: title_from_slug(&slug),
                    file_name: entry.file_name().to_string_lossy().into_owned(),
                    slug,
                    modified: DateTime::<Utc>::from(modified),
                })
            })
            .collect();

        listed.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.slug.cmp(&b.slug)));
        listed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogFile, MovieCatalog, SeriesCatalog};
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn series(title: &str) -> Catalog {
        let mut catalog = SeriesCatalog::empty(title);
        catalog.seasons.entry(1).or_default().insert(
            1,
            CatalogFile {
                name: format!("{}.S01E01.mkv", title),
                ident: "id1".to_string(),
                size: "100".to_string(),
            },
        );
        catalog.into()
    }

    fn set_mtime(path: &Path, secs_ago: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonCatalogStore::open(dir.path()).unwrap();

        let catalog = series("Breaking Bad");
        store.save("Breaking Bad", &catalog).unwrap();

        assert!(dir.path().join("breaking_bad.json").exists());
        assert_eq!(store.load("Breaking Bad"), Some(catalog));
    }

    #[test]
    fn test_saved_record_is_pretty_json() {
        let dir = TempDir::new().unwrap();
        let store = JsonCatalogStore::open(dir.path()).unwrap();
        store.save("Dune", &MovieCatalog::empty("Dune").into()).unwrap();

        let body = fs::read_to_string(dir.path().join("dune.json")).unwrap();
        assert!(body.contains('\n'));
        assert!(body.contains("\"file\": null"));
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = JsonCatalogStore::open(dir.path()).unwrap();

        store.save("Silo", &series("Silo")).unwrap();
        let empty: Catalog = SeriesCatalog::empty("Silo").into();
        store.save("Silo", &empty).unwrap();

        assert_eq!(store.load("Silo"), Some(empty));
        // No temp files left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_load_missing_and_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = JsonCatalogStore::open(dir.path()).unwrap();

        assert!(store.load("Nothing").is_none());

        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        assert!(store.load("Broken").is_none());
    }

    #[test]
    fn test_empty_title() {
        let dir = TempDir::new().unwrap();
        let store = JsonCatalogStore::open(dir.path()).unwrap();

        let result = store.save("  ", &series("x"));
        assert!(matches!(result, Err(StoreError::InvalidTitle(_))));
        assert!(store.load("").is_none());
        assert!(!store.remove(""));
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let store = JsonCatalogStore::open(dir.path()).unwrap();

        store.save("Silo", &series("Silo")).unwrap();
        assert!(store.remove("Silo"));
        assert!(!store.remove("Silo"));
        assert!(store.load("Silo").is_none());
    }

    #[test]
    fn test_list_all_most_recent_first() {
        let dir = TempDir::new().unwrap();
        let store = JsonCatalogStore::open(dir.path()).unwrap();

        store.save("Silo", &series("Silo")).unwrap();
        store.save("Breaking Bad", &series("Breaking Bad")).unwrap();
        store.save("Dark", &series("Dark")).unwrap();
        set_mtime(&dir.path().join("silo.json"), 10);
        set_mtime(&dir.path().join("breaking_bad.json"), 300);
        set_mtime(&dir.path().join("dark.json"), 100);
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let listed = store.list_all();
        let slugs: Vec<&str> = listed.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["silo", "dark", "breaking_bad"]);

        let last = &listed[2];
        assert_eq!(last.title, "breaking bad");
        assert_eq!(last.file_name, "breaking_bad.json");
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("series");
        let store = JsonCatalogStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(store.list_all().is_empty());
    }
}
