//! Search Index HTTP Client
//!
//! Posts query descriptors to the Archives of Nethys Elasticsearch endpoint
//! and reduces the response to at most one [`RawDocument`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::SearchConfig;

use super::document::RawDocument;
use super::error::{LookupError, Result};
use super::query::{SearchQuery, RESULT_SIZE};

// ============================================================================
// Result Set
// ============================================================================

/// Ordered hits of one query, capped to [`RESULT_SIZE`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    hits: Vec<RawDocument>,
}

impl ResultSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_hits(hits: impl IntoIterator<Item = RawDocument>) -> Self {
        Self {
            hits: hits.into_iter().take(RESULT_SIZE as usize).collect(),
        }
    }

    /// Parses a response body, treating anything unexpected as zero hits.
    pub fn from_response_body(body: &str) -> Self {
        let value: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Search index returned a non-JSON body: {}", e);
                return Self::empty();
            }
        };

        let hits = match value.pointer("/hits/hits").and_then(Value::as_array) {
            Some(hits) => hits,
            None => {
                debug!("Response carries no hits array");
                return Self::empty();
            }
        };

        Self::from_hits(
            hits.iter()
                .filter_map(|hit| hit.get("_source").cloned())
                .filter_map(RawDocument::from_value),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn top(&self) -> Option<&RawDocument> {
        self.hits.first()
    }

    pub fn into_top(self) -> Option<RawDocument> {
        self.hits.into_iter().next()
    }
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Executes a query against the remote index. One outbound call per invocation,
/// never retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn execute(&self, query: &SearchQuery) -> Result<ResultSet>;
}

// ============================================================================
// Elasticsearch Client
// ============================================================================

/// reqwest-backed [`SearchBackend`] for the public index.
#[derive(Debug, Clone)]
pub struct ElasticSearchClient {
    endpoint: String,
    http_client: reqwest::Client,
}

impl ElasticSearchClient {
    /// Creates a client with the configured endpoint and timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self::with_http_client(config.endpoint.clone(), http_client))
    }

    /// Creates a client around an existing HTTP client.
    pub fn with_http_client(endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchBackend for ElasticSearchClient {
    #[instrument(skip(self, query), fields(category = %query.category(), mode = ?query.mode()))]
    async fn execute(&self, query: &SearchQuery) -> Result<ResultSet> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::status(status.as_u16(), body));
        }

        let body = response.text().await?;
        let results = ResultSet::from_response_body(&body);
        debug!(hits = results.len(), "Search completed");
        Ok(results)
    }
}
