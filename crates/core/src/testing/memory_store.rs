//! In-memory catalog store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::catalog::{slugify, title_from_slug, Catalog, CatalogEntry, CatalogStore, StoreError};

#[derive(Debug, Clone)]
struct StoredRecord {
    catalog: Catalog,
    modified: DateTime<Utc>,
    sequence: u64,
}

/// Mock implementation of the CatalogStore trait.
///
/// Records live in a map keyed by slug. Saves can be made to fail to
/// exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    records: RwLock<HashMap<String, StoredRecord>>,
    fail_saves: AtomicBool,
    sequence: AtomicU64,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn save(&self, title: &str, catalog: &Catalog) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io("simulated save failure".to_string()));
        }
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(StoreError::InvalidTitle(title.to_string()));
        }

        let record = StoredRecord {
            catalog: catalog.clone(),
            modified: Utc::now(),
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst),
        };
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(slug, record);
        Ok(())
    }

    fn load(&self, title: &str) -> Option<Catalog> {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&slugify(title))
            .map(|r| r.catalog.clone())
    }

    fn remove(&self, title: &str) -> bool {
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&slugify(title))
            .is_some()
    }

    fn list_all(&self) -> Vec<CatalogEntry> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        let mut listed: Vec<(u64, CatalogEntry)> = records
            .iter()
            .map(|(slug, record)| {
                (
                    record.sequence,
                    CatalogEntry {
                        title: title_from_slug(slug),
                        slug: slug.clone(),
                        file_name: format!("{}.json", slug),
                        modified: record.modified,
                    },
                )
            })
            .collect();

        listed.sort_by(|(seq_a, a), (seq_b, b)| {
            b.modified.cmp(&a.modified).then_with(|| seq_b.cmp(seq_a))
        });
        listed.into_iter().map(|(_, entry)| entry).collect()
    }
}
