//! Batch outcome types

use serde::{Deserialize, Serialize};

use super::job::StructuredOutput;

/// Final state of one issue within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failed,
    Skipped,
}

/// Result record for one processed issue
///
/// Built once when the issue reaches a terminal state and never touched again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub issue_number: u64,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoped: Option<StructuredOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed: Option<StructuredOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Outcome {
    pub fn success(issue_number: u64, scoped: StructuredOutput, executed: StructuredOutput) -> Self {
        Self {
            issue_number,
            status: OutcomeStatus::Success,
            scoped: Some(scoped),
            executed: Some(executed),
            error: None,
            reason: None,
        }
    }

    pub fn failed(issue_number: u64, error: impl Into<String>) -> Self {
        Self {
            issue_number,
            status: OutcomeStatus::Failed,
            scoped: None,
            executed: None,
            error: Some(error.into()),
            reason: None,
        }
    }

    pub fn skipped(issue_number: u64, reason: impl Into<String>) -> Self {
        Self {
            issue_number,
            status: OutcomeStatus::Skipped,
            scoped: None,
            executed: None,
            error: None,
            reason: Some(reason.into()),
        }
    }
}

/// Aggregated result of one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub repo: String,
    pub total_selected: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(default)]
    pub skipped: usize,
    pub results: Vec<Outcome>,
}

impl BatchResult {
    pub fn new(repo: impl Into<String>, total_selected: usize) -> Self {
        Self {
            repo: repo.into(),
            total_selected,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            results: Vec::with_capacity(total_selected),
        }
    }

    /// Appends a finalized outcome and bumps the matching counter.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome.status {
            OutcomeStatus::Success => self.succeeded += 1,
            OutcomeStatus::Failed => self.failed += 1,
            OutcomeStatus::Skipped => self.skipped += 1,
        }
        self.results.push(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skipped_outcome_shape() {
        let value = serde_json::to_value(Outcome::skipped(2, "pull request")).unwrap();
        assert_eq!(
            value,
            json!({ "issue_number": 2, "status": "skipped", "reason": "pull request" })
        );
    }

    #[test]
    fn test_failed_outcome_shape() {
        let value = serde_json::to_value(Outcome::failed(3, "boom")).unwrap();
        assert_eq!(value, json!({ "issue_number": 3, "status": "failed", "error": "boom" }));
    }

    #[test]
    fn test_record_counts_once_per_outcome() {
        let mut batch = BatchResult::new("repo", 3);
        batch.record(Outcome::success(1, Default::default(), Default::default()));
        batch.record(Outcome::failed(2, "x"));
        batch.record(Outcome::skipped(3, "pull request"));

        assert_eq!(batch.succeeded, 1);
        assert_eq!(batch.failed, 1);
        assert_eq!(batch.skipped, 1);
        assert_eq!(batch.results.len(), 3);
    }
}
