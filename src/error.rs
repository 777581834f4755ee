//! Error types returned by the client.
//!
//! Every failure surfaces to the caller. Server rejections keep the status code
//! and the error body verbatim so callers can tell a bad request from a failed
//! task or a network problem.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{Task, TaskStatus};

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid request ({status}): {error}")]
    InvalidRequest { status: u16, error: ResponseError },

    #[error("server error ({status}): {error}")]
    Server { status: u16, error: ResponseError },

    #[error("{}", task_failure(.task))]
    TaskFailed { task: Box<Task> },

    #[error("task {task_uid} did not finish within {timeout:?} (last status: {last_status:?})")]
    Timeout {
        task_uid: u64,
        timeout: Duration,
        last_status: Option<TaskStatus>,
    },

    #[error("waiting for task {task_uid} was cancelled")]
    Cancelled { task_uid: u64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Failures below the HTTP status line: the request never completed or the
/// payload could not be (de)serialized.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

fn task_failure(task: &Task) -> String {
    match &task.error {
        Some(error) => format!("task {} failed: {error}", task.uid),
        None => format!("task {} failed without an error payload", task.uid),
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Transport(e.into())
    }
}

/// An error body as reported by the engine, either on a rejected request or on
/// a failed task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} [{code}]", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl ResponseError {
    /// Parses an error body. Bodies that aren't a JSON error object are kept
    /// as the message, verbatim.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            message: body.to_owned(),
            code: None,
            error_type: None,
            link: None,
        })
    }
}

impl Error {
    /// Maps a non-success HTTP response to an error.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let error = ResponseError::from_body(body);
        if (400..500).contains(&status) {
            Error::InvalidRequest { status, error }
        } else {
            Error::Server { status, error }
        }
    }

    /// The HTTP status code, for errors that came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::InvalidRequest { status, .. } | Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The engine's error payload, for rejected requests and failed tasks.
    pub fn response_error(&self) -> Option<&ResponseError> {
        match self {
            Error::InvalidRequest { error, .. } | Error::Server { error, .. } => Some(error),
            Error::TaskFailed { task } => task.error.as_ref(),
            _ => None,
        }
    }

    /// Whether waiting longer could change the outcome. Only a poll deadline
    /// qualifies; requests are never retried by the client.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}
