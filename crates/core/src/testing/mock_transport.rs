//! Mock search transport for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::searcher::{CandidateFile, SearchParams, SearchTransport, TransportError};

use super::fixtures::search_response_xml;

/// A recorded call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub action: String,
    pub params: SearchParams,
}

/// Mock implementation of the SearchTransport trait.
///
/// Replays configured listings as XML pages, sliced by the request's
/// `offset` and `limit`:
/// - Per-query listings, with a fallback listing for any other query
/// - Raw bodies for exercising the response parser
/// - Failures for a whole query or a single page
/// - A fixed delay before every response
///
/// # Example
///
/// ```rust,ignore
/// use shelf_core::testing::{MockTransport, fixtures};
///
/// let transport = MockTransport::new();
/// transport.set_files("Silo", vec![fixtures::candidate("a1", "Silo.S01E01.mkv")]).await;
///
/// // ... run a search ...
///
/// let calls = transport.recorded_calls().await;
/// assert_eq!(calls[0].params.what, "Silo");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    listings: Arc<RwLock<HashMap<String, Vec<CandidateFile>>>>,
    default_listing: Arc<RwLock<Vec<CandidateFile>>>,
    raw_bodies: Arc<RwLock<HashMap<String, String>>>,
    failing_queries: Arc<RwLock<HashSet<String>>>,
    failing_pages: Arc<RwLock<HashSet<(String, u32)>>>,
    delay: Arc<RwLock<Option<Duration>>>,
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full listing returned for a query.
    pub async fn set_files(&self, query: &str, files: Vec<CandidateFile>) {
        self.listings.write().await.insert(query.to_string(), files);
    }

    /// Set the listing returned for queries without their own.
    pub async fn set_default_files(&self, files: Vec<CandidateFile>) {
        *self.default_listing.write().await = files;
    }

    /// Return this body verbatim for every page of a query.
    pub async fn set_raw_response(&self, query: &str, body: impl Into<String>) {
        self.raw_bodies
            .write()
            .await
            .insert(query.to_string(), body.into());
    }

    /// Fail every page of a query with a connection error.
    pub async fn fail_query(&self, query: &str) {
        self.failing_queries.write().await.insert(query.to_string());
    }

    /// Fail the page of a query starting at `offset`.
    pub async fn fail_page(&self, query: &str, offset: u32) {
        self.failing_pages
            .write()
            .await
            .insert((query.to_string(), offset));
    }

    /// Delay every response.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Calls made for a given query, in order.
    pub async fn calls_for(&self, query: &str) -> Vec<RecordedCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.params.what == query)
            .cloned()
            .collect()
    }

    async fn listing_for(&self, query: &str) -> Vec<CandidateFile> {
        match self.listings.read().await.get(query) {
            Some(files) => files.clone(),
            None => self.default_listing.read().await.clone(),
        }
    }
}

#[async_trait]
impl SearchTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn call(&self, action: &str, params: &SearchParams) -> Result<String, TransportError> {
        self.calls.write().await.push(RecordedCall {
            action: action.to_string(),
            params: params.clone(),
        });

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let query = params.what.as_str();
        if self.failing_queries.read().await.contains(query)
            || self
                .failing_pages
                .read()
                .await
                .contains(&(query.to_string(), params.offset))
        {
            return Err(TransportError::ConnectionFailed(format!(
                "mock failure for '{}' at offset {}",
                query, params.offset
            )));
        }

        if let Some(body) = self.raw_bodies.read().await.get(query) {
            return Ok(body.clone());
        }

        let listing = self.listing_for(query).await;
        let page: Vec<CandidateFile> = listing
            .iter()
            .skip(params.offset as usize)
            .take(params.limit as usize)
            .cloned()
            .collect();

        Ok(search_response_xml(&page, Some(listing.len() as u64)))
    }
}
