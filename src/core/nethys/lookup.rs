//! Lookup Orchestration
//!
//! Two-stage resolution (exact keyword match, then full-text fallback) and the
//! boundary service that turns every outcome into a [`DisplayRecord`].

use std::sync::Arc;
use std::time::Duration;

use crate::config::SearchConfig;

use super::category::Category;
use super::client::{ElasticSearchClient, SearchBackend};
use super::display::{DisplayRecord, DisplayRecordBuilder};
use super::document::RawDocument;
use super::error::{LookupError, Result};
use super::extract::ResultExtractor;
use super::query::{MatchMode, QueryBuilder};

// ============================================================================
// Request / Outcome
// ============================================================================

/// One user lookup. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    name: String,
    category: Category,
}

impl LookupRequest {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// True when the name has no searchable content.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Result of a lookup that reached the index without a transport failure.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(RawDocument),
    NotFound,
}

/// Runs the exact stage, and the fuzzy stage only when the exact stage came
/// back empty. A transport error in either stage ends the lookup.
pub async fn resolve<B>(backend: &B, request: &LookupRequest) -> Result<LookupOutcome>
where
    B: SearchBackend + ?Sized,
{
    let exact = QueryBuilder::build(request.name(), request.category(), MatchMode::Exact);
    let results = backend.execute(&exact).await?;
    if let Some(document) = results.into_top() {
        log::debug!("Exact match for {} '{}'", request.category(), request.name());
        return Ok(LookupOutcome::Found(document));
    }

    log::debug!(
        "No exact match for {} '{}', falling back to full-text",
        request.category(),
        request.name()
    );
    let fuzzy = QueryBuilder::build(request.name(), request.category(), MatchMode::Fuzzy);
    let results = backend.execute(&fuzzy).await?;
    Ok(match results.into_top() {
        Some(document) => LookupOutcome::Found(document),
        None => LookupOutcome::NotFound,
    })
}

// ============================================================================
// Reference Service
// ============================================================================

/// Stateless entry point for reference lookups.
///
/// Every method takes `&self` and the service is cheap to clone, so callers can
/// run any number of lookups concurrently.
pub struct ReferenceService<B: SearchBackend = ElasticSearchClient> {
    backend: Arc<B>,
    extractor: ResultExtractor,
    builder: DisplayRecordBuilder,
    deadline: Option<Duration>,
}

impl<B: SearchBackend> Clone for ReferenceService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            extractor: self.extractor,
            builder: self.builder.clone(),
            deadline: self.deadline,
        }
    }
}

impl ReferenceService<ElasticSearchClient> {
    /// Creates a service talking to the configured index over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Ok(Self::new(ElasticSearchClient::new(config)?, config))
    }
}

impl<B: SearchBackend> ReferenceService<B> {
    pub fn new(backend: B, config: &SearchConfig) -> Self {
        Self::with_shared_backend(Arc::new(backend), config)
    }

    pub fn with_shared_backend(backend: Arc<B>, config: &SearchConfig) -> Self {
        Self {
            backend,
            extractor: ResultExtractor::new(config.description_limit),
            builder: DisplayRecordBuilder::new(config.site_base_url.clone()),
            deadline: config.deadline(),
        }
    }

    /// Overrides the default deadline applied to each lookup.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Resolves a request under the service's default deadline.
    pub async fn lookup(&self, request: &LookupRequest) -> Result<LookupOutcome> {
        self.lookup_within(request, self.deadline).await
    }

    async fn lookup_within(
        &self,
        request: &LookupRequest,
        deadline: Option<Duration>,
    ) -> Result<LookupOutcome> {
        if request.is_blank() {
            return Ok(LookupOutcome::NotFound);
        }

        match deadline {
            Some(limit) => tokio::time::timeout(limit, resolve(self.backend.as_ref(), request))
                .await
                .map_err(|_| LookupError::DeadlineExceeded(limit))?,
            None => resolve(self.backend.as_ref(), request).await,
        }
    }

    /// Looks up `name` in `category` and renders the best match.
    ///
    /// Never fails: not-found, transport, and unexpected outcomes all come back
    /// as renderable records.
    pub async fn search(&self, category: Category, name: &str) -> DisplayRecord {
        let request = LookupRequest::new(name, category);
        let outcome = self.lookup_within(&request, self.deadline).await;
        self.render(&request, outcome)
    }

    /// Like [`search`](Self::search) with a caller-supplied deadline.
    pub async fn search_with_deadline(
        &self,
        category: Category,
        name: &str,
        deadline: Duration,
    ) -> DisplayRecord {
        let request = LookupRequest::new(name, category);
        let outcome = self.lookup_within(&request, Some(deadline)).await;
        self.render(&request, outcome)
    }

    pub async fn search_spell(&self, name: &str) -> DisplayRecord {
        self.search(Category::Spell, name).await
    }

    pub async fn search_item(&self, name: &str) -> DisplayRecord {
        self.search(Category::Equipment, name).await
    }

    pub async fn search_feat(&self, name: &str) -> DisplayRecord {
        self.search(Category::Feat, name).await
    }

    pub async fn search_weapon(&self, name: &str) -> DisplayRecord {
        self.search(Category::Weapon, name).await
    }

    /// Collapses a lookup outcome into a record, logging failures.
    pub fn render(
        &self,
        request: &LookupRequest,
        outcome: Result<LookupOutcome>,
    ) -> DisplayRecord {
        let profile = request.category().profile();

        let document = match outcome {
            Ok(LookupOutcome::Found(document)) => document,
            Ok(LookupOutcome::NotFound) => {
                log::info!("No {} matching '{}'", profile.noun, request.name());
                return DisplayRecord::not_found(profile, request.name());
            }
            Err(e) if e.is_transport() => {
                log::warn!("Network error searching for {}: {}", profile.noun, e);
                return DisplayRecord::network_error();
            }
            Err(e) => {
                log::error!("Unexpected error searching for {}: {}", profile.noun, e);
                return DisplayRecord::unexpected_error(profile);
            }
        };

        match self.extractor.extract(&document, profile) {
            Ok(extracted) => self.builder.build(&extracted, profile),
            Err(e) => {
                log::error!("Unexpected error searching for {}: {}", profile.noun, e);
                DisplayRecord::unexpected_error(profile)
            }
        }
    }
}
