//! Agent job domain types
//!
//! A job is one session on the remote agent service. The service assigns the id,
//! we own the prompt and poll the session until it either produces the payload the
//! job kind is waiting for or lands in a terminal state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Semi-structured payload an agent attaches to a session once it has
/// machine-readable progress to report.
pub type StructuredOutput = Map<String, Value>;

/// Remote status values that end a session whether or not it produced a payload.
pub const TERMINAL_STATUSES: [&str; 5] = [
    "finished",
    "expired",
    "blocked",
    "suspend_requested",
    "suspend_requested_frontend",
];

/// The two kinds of session a batch launches per issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    /// Produce an action plan for an issue
    Scope,
    /// Carry out an action plan and open a pull request
    Implement,
}

impl JobKind {
    /// Returns true once a snapshot carries the payload this kind waits for.
    ///
    /// Scope sessions are done when the structured output holds a non-empty
    /// `action_plan` array. Implement sessions are done as soon as any pull request
    /// signal shows up: a PR url, a branch name or commits in the structured output,
    /// or a top-level `pull_request` on the session itself.
    pub fn is_complete(self, status: &SessionStatus) -> bool {
        match self {
            JobKind::Scope => status
                .structured_output()
                .and_then(|so| so.get("action_plan"))
                .and_then(Value::as_array)
                .is_some_and(|plan| !plan.is_empty()),
            JobKind::Implement => {
                let in_output = status.structured_output().is_some_and(|so| {
                    ["pull_request_url", "branch_name", "commits"]
                        .iter()
                        .any(|key| so.get(*key).is_some_and(is_truthy))
                });
                in_output || status.pull_request.as_ref().is_some_and(is_truthy)
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::Scope => "scope",
            JobKind::Implement => "implement",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One agent session as submitted by this process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub kind: JobKind,
    pub prompt: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A single poll snapshot of a remote session
///
/// Only the latest snapshot matters; nothing here is kept between polls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub status_enum: Option<String>,
    /// Older API responses only carry this field
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub structured_output: Option<Value>,
    #[serde(default)]
    pub pull_request: Option<Value>,
}

impl SessionStatus {
    /// Lower-cased status, preferring `status_enum` over `status`
    pub fn normalized_status(&self) -> String {
        self.status_enum
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.status.as_deref())
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATUSES.contains(&self.normalized_status().as_str())
    }

    /// Structured output, if the agent attached a mapping
    pub fn structured_output(&self) -> Option<&StructuredOutput> {
        self.structured_output.as_ref().and_then(Value::as_object)
    }

    /// Consumes the snapshot, yielding its structured output or an empty mapping.
    pub fn into_structured_output(self) -> StructuredOutput {
        match self.structured_output {
            Some(Value::Object(map)) => map,
            _ => StructuredOutput::new(),
        }
    }
}

/// JSON truthiness: null, false, zero and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
