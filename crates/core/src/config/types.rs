use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub webshare: Option<WebshareConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Catalog storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory; series and movies get their own subdirectories.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("shelf-data")
}

/// Search orchestration limits and fixed query parameters
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct SearchConfig {
    /// Results requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Hard cap on pages fetched per query.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    /// Scored candidates kept for aggregation.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Seasons probed by series queries (1..=N).
    #[serde(default = "default_seasons")]
    pub default_seasons: u32,
    /// Query variants issued concurrently.
    #[serde(default = "default_query_concurrency")]
    pub query_concurrency: usize,
    /// Upper bound on a single remote call.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_sort")]
    pub sort: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            max_candidates: default_max_candidates(),
            default_seasons: default_seasons(),
            query_concurrency: default_query_concurrency(),
            request_timeout_secs: default_request_timeout(),
            category: default_category(),
            sort: default_sort(),
        }
    }
}

fn default_page_size() -> u32 {
    100
}

fn default_max_pages() -> u32 {
    3
}

fn default_max_candidates() -> usize {
    200
}

fn default_seasons() -> u32 {
    5
}

fn default_query_concurrency() -> usize {
    4
}

fn default_request_timeout() -> u64 {
    30
}

fn default_category() -> String {
    "video".to_string()
}

fn default_sort() -> String {
    "recent".to_string()
}

/// Webshare API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebshareConfig {
    /// API root (e.g., "https://webshare.cz")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Session token sent as `wst`
    #[serde(default)]
    pub token: Option<String>,
    /// HTTP client timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://webshare.cz".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub search: SearchConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webshare: Option<SanitizedWebshareConfig>,
}

/// Sanitized Webshare config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedWebshareConfig {
    pub base_url: String,
    pub token_configured: bool,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            storage: config.storage.clone(),
            search: config.search.clone(),
            webshare: config.webshare.as_ref().map(|w| SanitizedWebshareConfig {
                base_url: w.base_url.clone(),
                token_configured: w.token.as_deref().is_some_and(|t| !t.is_empty()),
                timeout_secs: w.timeout_secs,
            }),
        }
    }
}
