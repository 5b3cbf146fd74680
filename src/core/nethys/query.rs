//! Query construction for the two lookup stages.

use std::collections::BTreeMap;

use serde::Serialize;

use super::category::Category;

/// Every query asks for the single top-ranked hit.
pub const RESULT_SIZE: u32 = 1;

/// Which lookup stage a query belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Category term plus lower-cased exact keyword match on the name.
    Exact,
    /// Category term plus relevance-ranked full-text match on the name.
    Fuzzy,
}

/// One entry of the `bool.must` clause list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Clause {
    Term(BTreeMap<String, String>),
    Match(BTreeMap<String, String>),
}

impl Clause {
    pub fn term(field: &str, value: impl Into<String>) -> Self {
        Clause::Term(BTreeMap::from([(field.to_string(), value.into())]))
    }

    pub fn text_match(field: &str, value: impl Into<String>) -> Self {
        Clause::Match(BTreeMap::from([(field.to_string(), value.into())]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct BoolQuery {
    must: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct QueryBody {
    #[serde(rename = "bool")]
    bool_query: BoolQuery,
}

/// Request body posted to the search endpoint.
///
/// Serializes to `{"query": {"bool": {"must": [...]}}, "size": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    query: QueryBody,
    size: u32,
    #[serde(skip)]
    mode: MatchMode,
    #[serde(skip)]
    category: Category,
}

impl SearchQuery {
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.query.bool_query.must
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Builds the query descriptor for each lookup stage.
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build(name: &str, category: Category, mode: MatchMode) -> SearchQuery {
        let profile = category.profile();
        let fields = &profile.index_fields;

        let name_clause = match mode {
            MatchMode::Exact => Clause::term(fields.exact_name, name.to_lowercase()),
            MatchMode::Fuzzy => Clause::text_match(fields.text_name, name),
        };

        SearchQuery {
            query: QueryBody {
                bool_query: BoolQuery {
                    must: vec![Clause::term(fields.category, profile.index_tag), name_clause],
                },
            },
            size: RESULT_SIZE,
            mode,
            category,
        }
    }
}
