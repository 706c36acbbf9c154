//! Durable catalogs keyed by title.
//!
//! A catalog is the outcome of one search: the best file per episode (series)
//! or the single best file (movie). Records are replaced whole on every
//! save; there is no partial update.

mod json;
mod types;

pub use json::JsonCatalogStore;
pub use types::*;

/// Trait for catalog storage.
///
/// Keys are derived from titles with [`slugify`]. Read failures are treated
/// as a cache miss and never surface as errors.
pub trait CatalogStore: Send + Sync {
    /// Store a catalog, replacing any previous record for the title.
    ///
    /// On failure the previous record is left untouched.
    fn save(&self, title: &str, catalog: &Catalog) -> Result<(), StoreError>;

    /// Load the record for a title. Absent or unreadable records yield `None`.
    fn load(&self, title: &str) -> Option<Catalog>;

    /// Delete the record for a title. Returns whether one existed.
    fn remove(&self, title: &str) -> bool;

    /// All stored records, most recently modified first.
    fn list_all(&self) -> Vec<CatalogEntry>;
}
