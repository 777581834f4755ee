//! Asynchronous server-side tasks and the poller that waits on them.
//!
//! Every mutating call (index creation, document additions, settings updates)
//! is accepted by the engine as a task. The call returns a [`TaskInfo`]; the
//! caller then polls `GET /tasks/{uid}` until the task reaches a terminal
//! [`TaskStatus`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::{abortable, AbortHandle, Aborted};
use futures::Future;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::client::Client;
use crate::config::PollPolicy;
use crate::error::{Error, ResponseError, Result};
use crate::transport::Method;

/// Lifecycle of a task. Starts `Enqueued` and only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Enqueued,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        match self {
            TaskStatus::Enqueued | TaskStatus::Processing => false,
            TaskStatus::Succeeded | TaskStatus::Failed | TaskStatus::Canceled => true,
        }
    }

    fn stage(self) -> u8 {
        match self {
            TaskStatus::Enqueued => 0,
            TaskStatus::Processing => 1,
            TaskStatus::Succeeded | TaskStatus::Failed | TaskStatus::Canceled => 2,
        }
    }

    /// Whether `next` may be observed after `self`. Polls can skip a stage
    /// (`Enqueued` then `Succeeded`) but never go back, and a terminal status
    /// is final.
    pub fn can_advance_to(self, next: TaskStatus) -> bool {
        self == next || (!self.is_terminal() && next.stage() > self.stage())
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TaskStatus::Enqueued => "enqueued",
            TaskStatus::Processing => "processing",
            TaskStatus::Succeeded => "succeeded",
            TaskStatus::Failed => "failed",
            TaskStatus::Canceled => "canceled",
        };
        f.write_str(s)
    }
}

/// The summary returned when the engine accepts a mutating call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub task_uid: u64,
    #[serde(default)]
    pub index_uid: Option<String>,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub kind: String,
    pub enqueued_at: DateTime<Utc>,
}

/// A task as reported by `GET /tasks/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub uid: u64,
    #[serde(default)]
    pub index_uid: Option<String>,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled_by: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub enqueued_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&serde_json::to_string_pretty(self).map_err(|_| std::fmt::Error)?)
    }
}

impl Client {
    /// Fetches the current state of a task.
    #[instrument(skip(self))]
    pub async fn get_task(&self, task_uid: u64) -> Result<Task> {
        self.send::<(), _>(Method::GET, &format!("/tasks/{task_uid}"), None)
            .await
    }

    /// Waits for a task using the client's [`PollPolicy`].
    pub async fn wait_for_task(&self, task_uid: u64) -> Result<Task> {
        self.wait_for_task_with(task_uid, None, None).await
    }

    /// Polls a task until it is terminal.
    ///
    /// Returns the task once it has `Succeeded` or been `Canceled`. A `Failed`
    /// task is an [`Error::TaskFailed`]. The timeout is measured from the first
    /// poll and bounds in-flight requests too. Errors from the requests
    /// themselves end the wait immediately.
    ///
    /// Dropping the returned future stops polling; the server-side task is
    /// unaffected.
    #[instrument(skip(self))]
    pub async fn wait_for_task_with(
        &self,
        task_uid: u64,
        timeout: Option<Duration>,
        interval: Option<Duration>,
    ) -> Result<Task> {
        let policy = PollPolicy {
            interval: interval.unwrap_or(self.poll.interval),
            timeout: timeout.unwrap_or(self.poll.timeout),
        };
        policy.validate()?;

        let mut last_status = None;
        let outcome = tokio::time::timeout(
            policy.timeout,
            self.poll_until_terminal(task_uid, policy.interval, &mut last_status),
        )
        .await;

        let task = match outcome {
            Ok(res) => res?,
            Err(_) => {
                return Err(Error::Timeout {
                    task_uid,
                    timeout: policy.timeout,
                    last_status,
                })
            }
        };

        if task.status == TaskStatus::Failed {
            return Err(Error::TaskFailed {
                task: Box::new(task),
            });
        }
        Ok(task)
    }

    /// Like [`Client::wait_for_task_with`], but also returns a handle that
    /// stops the wait. An aborted wait resolves to [`Error::Cancelled`].
    pub fn wait_for_task_abortable(
        &self,
        task_uid: u64,
        timeout: Option<Duration>,
        interval: Option<Duration>,
    ) -> (impl Future<Output = Result<Task>> + Send + 'static, AbortHandle) {
        let this = self.clone();
        let (fut, handle) = abortable(async move {
            this.wait_for_task_with(task_uid, timeout, interval).await
        });

        let fut = async move {
            match fut.await {
                Ok(res) => res,
                Err(Aborted) => Err(Error::Cancelled { task_uid }),
            }
        };

        (fut, handle)
    }

    async fn poll_until_terminal(
        &self,
        task_uid: u64,
        interval: Duration,
        last_status: &mut Option<TaskStatus>,
    ) -> Result<Task> {
        loop {
            let task = self.get_task(task_uid).await?;

            if let Some(prev) = *last_status {
                if !prev.can_advance_to(task.status) {
                    warn!(task_uid, %prev, next = %task.status, "task status went backwards");
                }
            }
            debug!(task_uid, status = %task.status, "polled task");
            *last_status = Some(task.status);

            if task.is_terminal() {
                return Ok(task);
            }

            tokio::time::sleep(interval).await;
        }
    }
}
