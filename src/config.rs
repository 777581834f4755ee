use std::time::Duration;

use crate::error::{Error, Result};

/// Default pause between two task polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Default upper bound on how long to wait for a task.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// How `wait_for_task` polls when the caller doesn't override it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

impl PollPolicy {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(Error::InvalidArgument(
                "poll interval must be positive".into(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidArgument("poll timeout must be positive".into()));
        }
        Ok(())
    }
}

/// Connection settings for a [`Client`](crate::Client).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub poll: PollPolicy,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            poll: PollPolicy::default(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Reads `MEILI_URL` (required), `MEILI_API_KEY`, `MEILI_POLL_INTERVAL_MS`
    /// and `MEILI_POLL_TIMEOUT_MS` from the environment.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("MEILI_URL")
            .map_err(|_| Error::Config("MEILI_URL env variable not set".into()))?;
        let mut config = Self::new(url);
        config.api_key = std::env::var("MEILI_API_KEY").ok().filter(|k| !k.is_empty());

        if let Some(interval) = duration_from_env("MEILI_POLL_INTERVAL_MS")? {
            config.poll.interval = interval;
        }
        if let Some(timeout) = duration_from_env("MEILI_POLL_TIMEOUT_MS")? {
            config.poll.timeout = timeout;
        }

        Ok(config)
    }
}

fn duration_from_env(var: &str) -> Result<Option<Duration>> {
    match std::env::var(var) {
        Ok(raw) => parse_millis(var, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_millis(var: &str, raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(Error::Config(format!(
            "{var} must be a positive number of milliseconds, got {raw:?}"
        ))),
    }
}
