//! Types for the remote file search.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A file record returned by the search API.
///
/// Equality and hashing are structural over every field, including the
/// opaque ones, so the same listing returned by two different queries
/// collapses to one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateFile {
    /// Unique file identifier on the remote service.
    pub ident: String,
    /// Display name (usually the release filename).
    pub name: String,
    /// Size in bytes, as reported. May be absent or non-numeric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Every other element of the record, untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl CandidateFile {
    pub fn new(ident: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            name: name.into(),
            size: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Parsed size in bytes, if the reported size is a number.
    pub fn size_bytes(&self) -> Option<u64> {
        self.size.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

/// Parameters of one search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free-text query.
    pub what: String,
    /// Content category (e.g. "video").
    pub category: String,
    /// Sort order (e.g. "recent").
    pub sort: String,
    /// Page size.
    pub limit: u32,
    /// Offset of the first result.
    pub offset: u32,
    /// Session token, if the caller has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Include files flagged as possibly removed.
    #[serde(default)]
    pub maybe_removed: bool,
}

impl SearchParams {
    /// Form fields as the search API expects them.
    pub fn to_form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("what", self.what.clone()),
            ("category", self.category.clone()),
            ("sort", self.sort.clone()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("maybe_removed", self.maybe_removed.to_string()),
        ];
        if let Some(token) = &self.token {
            form.push(("wst", token.clone()));
        }
        form
    }
}

/// One parsed page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Files on this page, in response order.
    pub files: Vec<CandidateFile>,
    /// Number of `<file>` records in the response, including ones skipped
    /// for lacking an `ident` or `name`. Decides whether the page was full.
    pub records: usize,
    /// Total number of hits reported by the API, if present.
    pub total: Option<u64>,
}

/// Errors from the search transport or from interpreting its response.
///
/// All of them are recoverable: the orchestrator skips the affected page or
/// query and carries on.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search backend API error: {0}")]
    ApiError(String),

    #[error("Search API returned status {status}: {message}")]
    Status { status: String, message: String },

    #[error("Failed to parse search response: {0}")]
    Parse(String),

    #[error("Request timeout")]
    Timeout,
}

impl TransportError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::ConnectionFailed(_) => "connection",
            TransportError::ApiError(_) => "api",
            TransportError::Status { .. } => "status",
            TransportError::Parse(_) => "parse",
            TransportError::Timeout => "timeout",
        }
    }
}

/// A remote search API speaking the `action` + form-params protocol.
///
/// Implementations return the raw response body; interpreting it is the
/// engine's job (see [`parse_search_response`](super::parse_search_response)).
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Invoke `action` (e.g. "search") with the given parameters.
    async fn call(&self, action: &str, params: &SearchParams) -> Result<String, TransportError>;
}
