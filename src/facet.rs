//! Facet search: list the values of one facet, narrowed by a filter, a text
//! query or a query on the facet values themselves.
//!
//! Only the fields a caller sets are transmitted. The engine treats an absent
//! `facetQuery` as "no narrowing" while `""` narrows to the empty value, so an
//! empty `facet_query` is sent as-is and is the caller's responsibility.

use serde::{Deserialize, Serialize};

/// How the engine satisfies multi-word queries. Forwarded untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingStrategy {
    /// Drop words from the end of the query until documents match.
    #[default]
    Last,
    /// Every word of the query must match.
    All,
}

impl std::str::FromStr for MatchingStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "last" => Ok(MatchingStrategy::Last),
            "all" => Ok(MatchingStrategy::All),
            other => Err(format!("unknown matching strategy {other:?}")),
        }
    }
}

/// Optional parameters of a facet search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSearchQuery {
    /// Search query on the documents, as in a regular search.
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Query matched against the facet values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_query: Option<String>,
    /// Filter expression, validated by the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_strategy: Option<MatchingStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_search_on: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
}

impl FacetSearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, q: impl Into<String>) -> Self {
        self.query = Some(q.into());
        self
    }

    pub fn with_facet_query(mut self, facet_query: impl Into<String>) -> Self {
        self.facet_query = Some(facet_query.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_matching_strategy(mut self, strategy: MatchingStrategy) -> Self {
        self.matching_strategy = Some(strategy);
        self
    }

    pub fn with_attributes_to_search_on<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes_to_search_on = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = Some(locales.into_iter().map(Into::into).collect());
        self
    }
}

/// The body of `POST /indexes/{uid}/facet-search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSearchRequest<'a> {
    pub facet_name: &'a str,
    #[serde(flatten)]
    pub query: &'a FacetSearchQuery,
}

/// A facet value and the number of matching documents carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetHit {
    pub value: String,
    pub count: u64,
}

/// Facet hits in the order the engine ranked them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSearchResult {
    pub facet_hits: Vec<FacetHit>,
    /// Echo of the request's `facetQuery`; `None` when none was sent.
    #[serde(default)]
    pub facet_query: Option<String>,
    #[serde(default)]
    pub processing_time_ms: u64,
}

impl std::fmt::Display for FacetSearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for hit in &self.facet_hits {
            writeln!(f, "{}\t{}", hit.count, hit.value)?;
        }
        Ok(())
    }
}
