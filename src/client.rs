use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::{
    config::{ClientConfig, PollPolicy},
    error::{Error, Result},
    index::{Index, IndexInfo, IndexesPage},
    task::TaskInfo,
    transport::{HttpTransport, Method, Transport},
};

/// A handle to one engine instance. Clones share the underlying connection
/// pool.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    pub(crate) poll: PollPolicy,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("poll", &self.poll).finish()
    }
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.poll.validate()?;
        let transport = HttpTransport::new(&config.url, config.api_key)
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self {
            transport: Arc::new(transport),
            poll: config.poll,
        })
    }

    /// Builds a client on top of any [`Transport`].
    pub fn with_transport(transport: Arc<dyn Transport>, poll: PollPolicy) -> Self {
        Self { transport, poll }
    }

    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    /// A handle on an index. Issues no request.
    pub fn index(&self, uid: impl Into<String>) -> Index {
        Index::new(self.clone(), uid.into())
    }

    /// Creates an index. The engine creates it asynchronously.
    #[instrument(skip(self))]
    pub async fn create_index(&self, uid: &str, primary_key: Option<&str>) -> Result<TaskInfo> {
        non_empty("index uid", uid)?;
        let mut body = json!({ "uid": uid });
        if let Some(key) = primary_key {
            body["primaryKey"] = json!(key);
        }
        self.send(Method::POST, "/indexes", Some(&body)).await
    }

    #[instrument(skip(self))]
    pub async fn get_index(&self, uid: &str) -> Result<IndexInfo> {
        let path = format!("/indexes/{}", segment("index uid", uid)?);
        self.send::<(), _>(Method::GET, &path, None).await
    }

    #[instrument(skip(self))]
    pub async fn list_indexes(&self, offset: Option<usize>, limit: Option<usize>) -> Result<IndexesPage> {
        let mut params = Vec::new();
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let path = with_query("/indexes".to_owned(), &params);
        self.send::<(), _>(Method::GET, &path, None).await
    }

    #[instrument(skip(self))]
    pub async fn delete_index(&self, uid: &str) -> Result<TaskInfo> {
        let path = format!("/indexes/{}", segment("index uid", uid)?);
        self.send::<(), _>(Method::DELETE, &path, None).await
    }

    /// Issues one request and decodes a successful response as `T`.
    ///
    /// Non-2xx responses become [`Error::InvalidRequest`] or [`Error::Server`];
    /// nothing is retried.
    pub(crate) async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        debug!(%method, path, "sending request");

        let resp = self.transport.request(method, path, body).await?;
        if !resp.is_success() {
            debug!(status = resp.status, path, "request rejected");
            return Err(Error::from_response(resp.status, &resp.body));
        }

        Ok(serde_json::from_str(&resp.body)?)
    }
}

pub(crate) fn non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArgument(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Percent-encodes `value` as a single path segment. `.` and `..` are
/// rejected since URL parsing would resolve them away.
pub(crate) fn segment(what: &str, value: &str) -> Result<String> {
    non_empty(what, value)?;
    if value == "." || value == ".." {
        return Err(Error::InvalidArgument(format!("{what} must not be {value:?}")));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Appends `params` to `path` as a percent-encoded query string.
pub(crate) fn with_query(path: String, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path;
    }
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{query}")
}
