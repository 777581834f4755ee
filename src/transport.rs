use async_trait::async_trait;
pub use reqwest::Method;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use crate::error::TransportError;

/// A raw response: the status code and the undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends JSON requests to the engine. `path` starts with `/` and may carry a
/// query string.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, TransportError>;
}

/// The [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    key: Option<String>,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, key: Option<String>) -> Result<Self, TransportError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| TransportError::Other(format!("invalid url {base_url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::Other(format!(
                "unsupported url scheme {:?}",
                parsed.scheme()
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            key,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, body))]
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, TransportError> {
        let mut req = self
            .client
            .request(method, format!("{}{path}", self.base_url));
        if let Some(key) = &self.key {
            req = req.bearer_auth(key);
        }
        if let Some(body) = &body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        Ok(Response { status, body })
    }
}
