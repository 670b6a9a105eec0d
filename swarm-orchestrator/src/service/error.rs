//! Service error types

use std::time::Duration;

use swarm_core::domain::job::JobKind;
use thiserror::Error;

use crate::repository::AgentError;

/// Failure of a single agent session
///
/// Caught at the batch loop and turned into a failed outcome for that issue.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Submitting the prompt was rejected by the agent service
    #[error("agent session creation failed: {0}")]
    Create(#[source] AgentError),

    /// Fetching a status snapshot was rejected by the agent service
    #[error("agent poll failed: {0}")]
    Poll(#[source] AgentError),

    /// The session did not produce its payload within the allotted wait
    #[error("{kind} session {session_id} did not finish in time (waited {}s)", .waited.as_secs())]
    Timeout {
        kind: JobKind,
        session_id: String,
        waited: Duration,
    },

    /// The agent service did not answer the session submission within the budget
    #[error("{kind} session was not created in time (waited {}s)", .waited.as_secs())]
    CreateTimeout { kind: JobKind, waited: Duration },

    /// The session ended but its output is unusable
    #[error("{0}")]
    InvalidResult(String),

    #[error("cancelled")]
    Cancelled,
}

impl SessionError {
    /// True when the agent API itself returned an error
    pub fn is_remote(&self) -> bool {
        matches!(self, SessionError::Create(_) | SessionError::Poll(_))
    }

    /// Message recorded on the failed outcome
    pub fn outcome_message(&self) -> String {
        match self {
            SessionError::Timeout { .. } | SessionError::CreateTimeout { .. } => {
                format!("Timeout: {}", self)
            }
            other => other.to_string(),
        }
    }
}

/// Precondition failure that aborts a whole batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Issue #{0} not found. Issue doesn't exist or call /{{repo}}/issues first")]
    IssueNotFound(u64),
}
