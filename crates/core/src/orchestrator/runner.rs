//! Search orchestration: query fan-out, pagination, ranking, aggregation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, CatalogStore, MovieCatalog, SeriesCatalog};
use crate::config::SearchConfig;
use crate::matching::{detect_episode, MatchTier, QueryBuilder, TitleMatcher};
use crate::metrics::{
    CANDIDATES_PER_SEARCH, CATALOG_WRITES, SEARCHES_TOTAL, SEARCH_DURATION, TRANSPORT_REQUESTS,
};
use crate::searcher::{
    parse_search_response, CandidateFile, CandidateSet, SearchPage, SearchParams, SearchTransport,
    TransportError,
};

use super::aggregate::{aggregate_movie, aggregate_series};
use super::{MatchedFile, SearchKind, SearchStats};

const SEARCH_ACTION: &str = "search";

/// Files and counters gathered for one query variant.
#[derive(Debug, Default)]
struct QueryOutcome {
    files: Vec<CandidateFile>,
    pages: usize,
    failed_pages: usize,
}

/// Turns a title into a catalog by searching, ranking and aggregating.
///
/// One orchestrator serves any number of concurrent searches; the title
/// matcher's pattern memo is shared between them.
pub struct SearchOrchestrator {
    config: SearchConfig,
    matcher: TitleMatcher,
    queries: QueryBuilder,
    series_store: Arc<dyn CatalogStore>,
    movie_store: Arc<dyn CatalogStore>,
}

impl SearchOrchestrator {
    pub fn new(
        config: SearchConfig,
        series_store: Arc<dyn CatalogStore>,
        movie_store: Arc<dyn CatalogStore>,
    ) -> Self {
        let queries = QueryBuilder::new(config.default_seasons);
        Self {
            config,
            matcher: TitleMatcher::new(),
            queries,
            series_store,
            movie_store,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn matcher(&self) -> &TitleMatcher {
        &self.matcher
    }

    pub fn series_store(&self) -> &Arc<dyn CatalogStore> {
        &self.series_store
    }

    pub fn movie_store(&self) -> &Arc<dyn CatalogStore> {
        &self.movie_store
    }

    /// Search for a series and persist the best file per episode.
    ///
    /// Transport failures only shrink the result; a search that finds
    /// nothing returns an empty catalog.
    pub async fn search_series(
        &self,
        title: &str,
        transport: &dyn SearchTransport,
        token: Option<&str>,
    ) -> SeriesCatalog {
        let start = Instant::now();
        let queries = self.queries.series_queries(title);
        let (candidates, mut stats) = self.collect_candidates(&queries, transport, token).await;

        let matches = self.rank(title, candidates, SearchKind::Series);
        stats.matched = matches.len();

        let catalog = aggregate_series(title, &matches);
        stats.slots = catalog.episode_count();

        self.persist(SearchKind::Series, title, catalog.clone().into());
        self.finish(SearchKind::Series, title, &stats, start);
        catalog
    }

    /// Search for a movie and persist the single best file.
    pub async fn search_movie(
        &self,
        title: &str,
        transport: &dyn SearchTransport,
        token: Option<&str>,
    ) -> MovieCatalog {
        let start = Instant::now();
        let queries = self.queries.movie_queries(title);
        let (candidates, mut stats) = self.collect_candidates(&queries, transport, token).await;

        let matches = self.rank(title, candidates, SearchKind::Movie);
        stats.matched = matches.len();

        let catalog = aggregate_movie(title, &matches);
        stats.slots = usize::from(catalog.file.is_some());

        self.persist(SearchKind::Movie, title, catalog.clone().into());
        self.finish(SearchKind::Movie, title, &stats, start);
        catalog
    }

    /// Run every query (bounded concurrency) and merge the results in query
    /// order, dropping structural duplicates.
    async fn collect_candidates(
        &self,
        queries: &[String],
        transport: &dyn SearchTransport,
        token: Option<&str>,
    ) -> (Vec<CandidateFile>, SearchStats) {
        let pending: Vec<_> = queries
            .iter()
            .map(|query| self.fetch_query(query, transport, token))
            .collect();

        let outcomes: Vec<QueryOutcome> = stream::iter(pending)
            .buffered(self.config.query_concurrency.max(1))
            .collect()
            .await;

        let mut stats = SearchStats {
            queries: queries.len(),
            ..SearchStats::default()
        };
        let mut seen = CandidateSet::new();
        for outcome in outcomes {
            stats.pages += outcome.pages;
            stats.failed_pages += outcome.failed_pages;
            seen.extend(outcome.files);
        }
        stats.candidates = seen.len();

        (seen.into_vec(), stats)
    }

    /// Page through one query until a short page, a failure, or the page cap.
    async fn fetch_query(
        &self,
        query: &str,
        transport: &dyn SearchTransport,
        token: Option<&str>,
    ) -> QueryOutcome {
        let mut outcome = QueryOutcome::default();
        let page_size = self.config.page_size;

        for page in 0..self.config.max_pages {
            let params = SearchParams {
                what: query.to_string(),
                category: self.config.category.clone(),
                sort: self.config.sort.clone(),
                limit: page_size,
                offset: page.saturating_mul(page_size),
                token: token.map(str::to_string),
                maybe_removed: true,
            };

            match self.fetch_page(transport, &params).await {
                Ok(page) => {
                    let records = page.records;
                    debug!(
                        query = %query,
                        offset = params.offset,
                        records,
                        kept = page.files.len(),
                        "Fetched search page"
                    );
                    outcome.pages += 1;
                    outcome.files.extend(page.files);
                    // Skipped records still occupy the page.
                    if records < page_size as usize {
                        break;
                    }
                }
                Err(e) => {
                    warn!(
                        query = %query,
                        offset = params.offset,
                        error = %e,
                        "Search page failed, skipping rest of query"
                    );
                    outcome.failed_pages += 1;
                    break;
                }
            }
        }

        outcome
    }

    async fn fetch_page(
        &self,
        transport: &dyn SearchTransport,
        params: &SearchParams,
    ) -> Result<SearchPage, TransportError> {
        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        let result = match tokio::time::timeout(timeout, transport.call(SEARCH_ACTION, params)).await
        {
            Ok(response) => response.and_then(|body| parse_search_response(&body)),
            Err(_) => Err(TransportError::Timeout),
        };

        let label = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        TRANSPORT_REQUESTS
            .with_label_values(&[transport.name(), label])
            .inc();

        result
    }

    /// Score candidates, drop non-matches (and, for series, files without a
    /// detectable episode), order by score and cap the pool.
    ///
    /// The sort is stable, so equally scored files keep their arrival order.
    fn rank(&self, title: &str, candidates: Vec<CandidateFile>, kind: SearchKind) -> Vec<MatchedFile> {
        let pattern = self.matcher.compile(title);
        let mut matches: Vec<MatchedFile> = candidates
            .into_iter()
            .filter_map(|file| {
                let tier = pattern.tier(&file.name);
                if tier == MatchTier::None {
                    return None;
                }
                let episode = match kind {
                    SearchKind::Series => Some(detect_episode(&file.name, title)?),
                    SearchKind::Movie => None,
                };
                Some(MatchedFile { file, tier, episode })
            })
            .collect();

        matches.sort_by(|a, b| b.tier.cmp(&a.tier));
        matches.truncate(self.config.max_candidates);
        matches
    }

    fn persist(&self, kind: SearchKind, title: &str, catalog: Catalog) {
        let store = match kind {
            SearchKind::Series => &self.series_store,
            SearchKind::Movie => &self.movie_store,
        };

        match store.save(title, &catalog) {
            Ok(()) => {
                CATALOG_WRITES
                    .with_label_values(&[kind.as_str(), "success"])
                    .inc();
            }
            Err(e) => {
                warn!(title = %title, kind = kind.as_str(), error = %e, "Failed to save catalog");
                CATALOG_WRITES
                    .with_label_values(&[kind.as_str(), "failure"])
                    .inc();
            }
        }
    }

    fn finish(&self, kind: SearchKind, title: &str, stats: &SearchStats, start: Instant) {
        let result = if stats.slots > 0 { "found" } else { "empty" };
        SEARCHES_TOTAL
            .with_label_values(&[kind.as_str(), result])
            .inc();
        SEARCH_DURATION
            .with_label_values(&[kind.as_str()])
            .observe(start.elapsed().as_secs_f64());
        CANDIDATES_PER_SEARCH
            .with_label_values(&[kind.as_str()])
            .observe(stats.matched as f64);

        info!(
            title = %title,
            kind = kind.as_str(),
            queries = stats.queries,
            pages = stats.pages,
            failed_pages = stats.failed_pages,
            candidates = stats.candidates,
            matched = stats.matched,
            slots = stats.slots,
            duration_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );
    }
}
