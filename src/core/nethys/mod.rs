//! Archives of Nethys Reference Lookups
//!
//! Queries the public Archives of Nethys search index for a single entry and
//! renders it as a chat-ready [`DisplayRecord`].
//!
//! ## Pipeline
//!
//! 1. [`QueryBuilder`] builds an exact keyword query for the category.
//! 2. [`SearchBackend`] executes it; an empty result triggers one full-text
//!    fallback query.
//! 3. [`ResultExtractor`] cleans the description and reads category attributes.
//! 4. [`DisplayRecordBuilder`] lays out the fields for the category.
//!
//! [`ReferenceService`] runs the whole pipeline and never returns an error:
//! every outcome is a renderable record.
//!
//! ```no_run
//! use nethys_oracle::config::SearchConfig;
//! use nethys_oracle::core::nethys::ReferenceService;
//!
//! # async fn example() -> nethys_oracle::core::nethys::Result<()> {
//! let service = ReferenceService::from_config(&SearchConfig::default())?;
//! let record = service.search_spell("Fireball").await;
//! println!("{}", record.title);
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod client;
pub mod display;
pub mod document;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod query;

pub use category::{Category, CategoryProfile, FieldTemplate, UnknownCategory};
pub use client::{ElasticSearchClient, ResultSet, SearchBackend};
pub use display::{DisplayRecord, DisplayRecordBuilder, EmbedColor, EmbedField, RecordKind};
pub use document::RawDocument;
pub use error::{LookupError, Result};
pub use extract::{clean_html, ExtractedFields, ResultExtractor, DESCRIPTION_LIMIT};
pub use lookup::{resolve, LookupOutcome, LookupRequest, ReferenceService};
pub use query::{MatchMode, QueryBuilder, SearchQuery};
