//! Session poll engine
//!
//! Polls an agent session until the job kind's completion predicate holds, the
//! session reaches a terminal status, or the wait budget runs out. Waits between
//! polls back off exponentially up to a ceiling.

use std::sync::Arc;
use std::time::Duration;

use swarm_core::domain::job::{Job, SessionStatus};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::repository::AgentRepository;
use crate::service::error::SessionError;

/// Backoff bounds between two polls of the same session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            initial_backoff: Duration::from_secs(10),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Doubling delay sequence capped at a ceiling
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    max: Duration,
}

impl Backoff {
    pub fn new(settings: PollSettings) -> Self {
        Self {
            next: settings.initial_backoff.min(settings.max_backoff),
            max: settings.max_backoff,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = (delay * 2).min(self.max);
        delay
    }
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        Some(self.next_delay())
    }
}

/// Waits for agent sessions to complete
#[derive(Clone)]
pub struct PollEngine {
    agent: Arc<dyn AgentRepository>,
    settings: PollSettings,
}

impl PollEngine {
    pub fn new(agent: Arc<dyn AgentRepository>, settings: PollSettings) -> Self {
        Self { agent, settings }
    }

    /// Polls `job` until it completes, ends, times out or is cancelled.
    ///
    /// The completion predicate of the job's kind wins over the terminal status
    /// check, so a session that already carries its payload is returned even while
    /// still running. A terminal snapshot without the payload is returned as-is.
    /// Errors from the agent API are never retried. Backoff sleeps count against
    /// `timeout`, and no single status fetch may outlast what remains of it.
    pub async fn wait(
        &self,
        job: &Job,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<SessionStatus, SessionError> {
        let mut backoff = Backoff::new(self.settings);
        let mut waited = Duration::ZERO;

        loop {
            // A status fetch may only spend what is left of the budget
            let remaining = timeout.saturating_sub(waited);
            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SessionError::Cancelled),
                res = tokio::time::timeout(remaining, self.agent.get_session(&job.id)) => res,
            };
            let status = match fetched {
                Ok(res) => res.map_err(SessionError::Poll)?,
                Err(_) => {
                    warn!(session = %job.id, waited_secs = timeout.as_secs(), "Status fetch stalled past the session budget");
                    return Err(SessionError::Timeout {
                        kind: job.kind,
                        session_id: job.id.clone(),
                        waited: timeout,
                    });
                }
            };

            if job.kind.is_complete(&status) {
                info!(session = %job.id, kind = %job.kind, waited_secs = waited.as_secs(), "Session produced its result");
                return Ok(status);
            }

            let current = status.normalized_status();
            debug!(session = %job.id, status = %current, waited_secs = waited.as_secs(), "Polled session");

            if status.is_terminal() {
                info!(session = %job.id, status = %current, "Session ended without the expected result");
                return Ok(status);
            }

            let delay = backoff.next_delay();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SessionError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
            waited += delay;

            if waited >= timeout {
                return Err(SessionError::Timeout {
                    kind: job.kind,
                    session_id: job.id.clone(),
                    waited,
                });
            }
        }
    }
}
