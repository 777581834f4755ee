//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::transport::{Method, Response, Transport};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Replays queued responses in order and records every request. Once the
/// queue is empty the `repeat` response, if any, is served forever.
#[derive(Default)]
pub struct ScriptedTransport {
    queue: Mutex<VecDeque<Response>>,
    fallback: Mutex<Option<Response>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, status: u16, body: impl Into<String>) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Response::new(status, body));
    }

    pub fn repeat(&self, status: u16, body: impl Into<String>) {
        *self.fallback.lock().unwrap() = Some(Response::new(status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            path: path.to_owned(),
            body,
        });

        let next = self.queue.lock().unwrap().pop_front();
        next.or_else(|| self.fallback.lock().unwrap().clone())
            .ok_or_else(|| TransportError::Other("connection refused".into()))
    }
}
