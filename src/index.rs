use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::instrument;

use crate::{
    client::{non_empty, segment, with_query, Client},
    error::Result,
    facet::{FacetSearchQuery, FacetSearchRequest, FacetSearchResult},
    search::{SearchQuery, SearchResults},
    settings::{LocalizedAttribute, Settings},
    task::{Task, TaskInfo},
    transport::Method,
};

/// An index as described by `GET /indexes/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    pub uid: String,
    #[serde(default)]
    pub primary_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of `GET /indexes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexesPage {
    pub results: Vec<IndexInfo>,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
}

/// A handle on one index of a [`Client`].
#[derive(Debug, Clone)]
pub struct Index {
    client: Client,
    uid: String,
}

impl Index {
    pub(crate) fn new(client: Client, uid: String) -> Self {
        Self { client, uid }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn path(&self, rest: &str) -> Result<String> {
        Ok(format!("/indexes/{}{rest}", segment("index uid", &self.uid)?))
    }

    /// Fetches this index's description.
    pub async fn info(&self) -> Result<IndexInfo> {
        self.client.get_index(&self.uid).await
    }

    /// Waits for a task using the client's poll policy.
    pub async fn wait_for_task(&self, task_uid: u64) -> Result<Task> {
        self.client.wait_for_task(task_uid).await
    }

    /// Adds documents, replacing any existing document with the same primary
    /// key.
    #[instrument(skip_all, fields(index = %self.uid, count = documents.len()))]
    pub async fn add_documents<T: Serialize>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        let params: Vec<_> = primary_key
            .map(|key| ("primaryKey", key.to_owned()))
            .into_iter()
            .collect();
        let path = with_query(self.path("/documents")?, &params);
        self.client.send(Method::POST, &path, Some(documents)).await
    }

    #[instrument(skip(self), fields(index = %self.uid))]
    pub async fn get_document<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        let path = self.path(&format!("/documents/{}", segment("document id", id)?))?;
        self.client.send::<(), _>(Method::GET, &path, None).await
    }

    #[instrument(skip_all, fields(index = %self.uid))]
    pub async fn search<T: DeserializeOwned>(&self, query: &SearchQuery) -> Result<SearchResults<T>> {
        self.client
            .send(Method::POST, &self.path("/search")?, Some(query))
            .await
    }

    /// Lists the values of `facet_name` among the documents matching `query`.
    ///
    /// Hits come back in the engine's order. Without a query, no filter, text
    /// query or facet query is applied.
    #[instrument(skip(self, query), fields(index = %self.uid))]
    pub async fn facet_search(
        &self,
        facet_name: &str,
        query: Option<&FacetSearchQuery>,
    ) -> Result<FacetSearchResult> {
        let path = self.path("/facet-search")?;
        non_empty("facet name", facet_name)?;

        let default = FacetSearchQuery::default();
        let body = FacetSearchRequest {
            facet_name,
            query: query.unwrap_or(&default),
        };
        self.client
            .send(Method::POST, &path, Some(&body))
            .await
    }

    pub async fn get_settings(&self) -> Result<Settings> {
        self.client
            .send::<(), _>(Method::GET, &self.path("/settings")?, None)
            .await
    }

    /// Updates the settings that are set in `settings`, leaving the others
    /// as they are.
    #[instrument(skip_all, fields(index = %self.uid))]
    pub async fn update_settings(&self, settings: &Settings) -> Result<TaskInfo> {
        self.client
            .send(Method::PATCH, &self.path("/settings")?, Some(settings))
            .await
    }

    /// Resets every setting to its default value.
    pub async fn reset_settings(&self) -> Result<TaskInfo> {
        self.client
            .send::<(), _>(Method::DELETE, &self.path("/settings")?, None)
            .await
    }

    pub async fn get_filterable_attributes(&self) -> Result<Vec<String>> {
        self.client
            .send::<(), _>(
                Method::GET,
                &self.path("/settings/filterable-attributes")?,
                None,
            )
            .await
    }

    pub async fn update_filterable_attributes(&self, attributes: &[String]) -> Result<TaskInfo> {
        self.client
            .send(
                Method::PUT,
                &self.path("/settings/filterable-attributes")?,
                Some(attributes),
            )
            .await
    }

    /// The engine answers `null` when no localized attributes are set.
    pub async fn get_localized_attributes(&self) -> Result<Option<Vec<LocalizedAttribute>>> {
        self.client
            .send::<(), _>(
                Method::GET,
                &self.path("/settings/localized-attributes")?,
                None,
            )
            .await
    }

    #[instrument(skip_all, fields(index = %self.uid, rules = attributes.len()))]
    pub async fn update_localized_attributes(
        &self,
        attributes: &[LocalizedAttribute],
    ) -> Result<TaskInfo> {
        self.client
            .send(
                Method::PUT,
                &self.path("/settings/localized-attributes")?,
                Some(attributes),
            )
            .await
    }

    pub async fn reset_localized_attributes(&self) -> Result<TaskInfo> {
        self.client
            .send::<(), _>(
                Method::DELETE,
                &self.path("/settings/localized-attributes")?,
                None,
            )
            .await
    }
}
