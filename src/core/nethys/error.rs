//! Lookup Error Types
//!
//! Error handling for the Archives of Nethys lookup pipeline.

use thiserror::Error;

/// Errors raised while resolving a reference lookup.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Connection refused, DNS failure, client-side timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search index answered with a non-2xx status.
    #[error("Search index returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The caller-supplied deadline elapsed before the lookup finished.
    #[error("Lookup deadline of {0:?} exceeded")]
    DeadlineExceeded(std::time::Duration),

    /// A hit came back without the attributes needed to render it.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LookupError {
    /// Returns true for failures that should be reported as a network error.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::DeadlineExceeded(_)
        )
    }

    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;
