//! Caller-facing operations over the orchestrator and catalog stores.

use std::path::Path;
use std::sync::Arc;

use crate::catalog::{CatalogEntry, CatalogStore, JsonCatalogStore, MovieCatalog, SeriesCatalog, StoreError};
use crate::config::SearchConfig;
use crate::orchestrator::SearchOrchestrator;
use crate::searcher::SearchTransport;

const SERIES_DIR: &str = "series";
const MOVIES_DIR: &str = "movies";

/// Series and movie catalogs, searchable and stored by title.
pub struct MediaLibrary {
    orchestrator: SearchOrchestrator,
}

impl MediaLibrary {
    pub fn new(
        config: SearchConfig,
        series_store: Arc<dyn CatalogStore>,
        movie_store: Arc<dyn CatalogStore>,
    ) -> Self {
        Self {
            orchestrator: SearchOrchestrator::new(config, series_store, movie_store),
        }
    }

    /// Open a library with JSON stores under `data_dir/series` and
    /// `data_dir/movies`.
    pub fn open(config: SearchConfig, data_dir: &Path) -> Result<Self, StoreError> {
        let series = JsonCatalogStore::open(data_dir.join(SERIES_DIR))?;
        let movies = JsonCatalogStore::open(data_dir.join(MOVIES_DIR))?;
        Ok(Self::new(config, Arc::new(series), Arc::new(movies)))
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    /// Search for a series, replacing its stored catalog.
    pub async fn search_series(
        &self,
        title: &str,
        transport: &dyn SearchTransport,
        token: Option<&str>,
    ) -> SeriesCatalog {
        self.orchestrator.search_series(title, transport, token).await
    }

    /// Search for a movie, replacing its stored catalog.
    pub async fn search_movie(
        &self,
        title: &str,
        transport: &dyn SearchTransport,
        token: Option<&str>,
    ) -> MovieCatalog {
        self.orchestrator.search_movie(title, transport, token).await
    }

    pub fn load_series(&self, title: &str) -> Option<SeriesCatalog> {
        self.orchestrator.series_store().load(title)?.into_series()
    }

    pub fn load_movie(&self, title: &str) -> Option<MovieCatalog> {
        self.orchestrator.movie_store().load(title)?.into_movie()
    }

    pub fn remove_series(&self, title: &str) -> bool {
        self.orchestrator.series_store().remove(title)
    }

    pub fn remove_movie(&self, title: &str) -> bool {
        self.orchestrator.movie_store().remove(title)
    }

    pub fn list_series(&self) -> Vec<CatalogEntry> {
        self.orchestrator.series_store().list_all()
    }

    pub fn list_movies(&self) -> Vec<CatalogEntry> {
        self.orchestrator.movie_store().list_all()
    }
}
