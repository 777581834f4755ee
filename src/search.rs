use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::facet::MatchingStrategy;

/// Parameters of `POST /indexes/{uid}/search`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_search_on: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_strategy: Option<MatchingStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locales: Option<Vec<String>>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            query: Some(q.into()),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_facets<I, S>(mut self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets = Some(facets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_matching_strategy(mut self, strategy: MatchingStrategy) -> Self {
        self.matching_strategy = Some(strategy);
        self
    }
}

/// Per-facet value counts, as requested through [`SearchQuery::facets`].
pub type FacetDistribution = BTreeMap<String, BTreeMap<String, u64>>;

/// The hits of a search, decoded as `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<T> {
    pub hits: Vec<T>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub processing_time_ms: u64,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub estimated_total_hits: Option<usize>,
    #[serde(default)]
    pub facet_distribution: Option<FacetDistribution>,
}

impl<T: Serialize> std::fmt::Display for SearchResults<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serde_json::to_string_pretty(&self.hits).map_err(|_| std::fmt::Error)?)
    }
}
