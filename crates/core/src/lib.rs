pub mod catalog;
pub mod config;
pub mod library;
pub mod matching;
pub mod metrics;
pub mod orchestrator;
pub mod searcher;
pub mod testing;

pub use catalog::{
    slugify, Catalog, CatalogEntry, CatalogFile, CatalogStore, JsonCatalogStore, MovieCatalog,
    SeriesCatalog, StoreError,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    SearchConfig, ServerConfig, StorageConfig, WebshareConfig,
};
pub use library::MediaLibrary;
pub use matching::{
    build_queries, detect_episode, normalize, score_quality, EpisodeKey, MatchTier, QueryBuilder,
    TitleMatcher, TitlePattern,
};
pub use orchestrator::{MatchedFile, SearchKind, SearchOrchestrator, SearchStats};
pub use searcher::{
    parse_search_response, CandidateFile, SearchParams, SearchTransport, TransportError,
    WebshareTransport,
};
