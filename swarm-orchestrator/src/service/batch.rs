//! Batch orchestrator
//!
//! Scopes and then implements a list of issues, one at a time. Every issue ends
//! in exactly one outcome; a failing issue never stops the ones after it.

use swarm_core::domain::issue::{Issue, IssueTarget};
use swarm_core::domain::job::StructuredOutput;
use swarm_core::domain::outcome::{BatchResult, Outcome};
use swarm_core::domain::plan::ActionPlan;
use swarm_core::dto::batch::TargetSelection;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::service::error::{BatchError, SessionError};
use crate::service::issue_store::RepoSnapshot;
use crate::service::session::{SessionContext, SessionLauncher};

pub const SKIP_PULL_REQUEST: &str = "pull request";
pub const SKIP_CANCELLED: &str = "cancelled";

/// Runs scope-then-implement over a batch of issues
#[derive(Clone)]
pub struct BatchOrchestrator {
    launcher: SessionLauncher,
    /// Web URL under which repositories live, e.g. `https://github.com/octo`
    repo_base_url: String,
}

impl BatchOrchestrator {
    pub fn new(launcher: SessionLauncher, repo_base_url: impl Into<String>) -> Self {
        Self {
            launcher,
            repo_base_url: repo_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Runs one batch against a snapshot of the repository's issues.
    ///
    /// Every target is resolved before any session starts; an unknown number fails
    /// the whole batch. Once processing begins, per-issue failures only show up in
    /// the outcomes. When `cancel` fires, the issue in flight fails and the rest
    /// are skipped.
    pub async fn run(
        &self,
        repo: &str,
        selection: &TargetSelection,
        snapshot: &RepoSnapshot,
        cancel: &CancellationToken,
    ) -> Result<BatchResult, BatchError> {
        let targets = resolve_targets(selection, snapshot)?;
        let span = info_span!("batch", batch_id = %Uuid::new_v4(), repo = %repo);

        let result = async move {
            info!(targets = targets.len(), "Starting batch");

            let repo_url = format!("{}/{}", self.repo_base_url, repo);
            let mut result = BatchResult::new(repo, targets.len());

            for (idx, issue) in targets.iter().enumerate() {
                if cancel.is_cancelled() {
                    warn!(remaining = targets.len() - idx, "Batch cancelled, skipping remaining issues");
                    for rest in &targets[idx..] {
                        result.record(Outcome::skipped(rest.number, SKIP_CANCELLED));
                    }
                    break;
                }

                if issue.is_pull_request() {
                    info!(issue = issue.number, "Skipping pull request");
                    result.record(Outcome::skipped(issue.number, SKIP_PULL_REQUEST));
                    continue;
                }

                let outcome = self.process_issue(&repo_url, issue.target(), cancel).await;
                result.record(outcome);
            }

            info!(
                total = result.total_selected,
                succeeded = result.succeeded,
                failed = result.failed,
                skipped = result.skipped,
                "Batch finished"
            );
            result
        }
        .instrument(span)
        .await;

        Ok(result)
    }

    async fn process_issue(
        &self,
        repo_url: &str,
        target: IssueTarget,
        cancel: &CancellationToken,
    ) -> Outcome {
        let ctx = SessionContext {
            repo_url: repo_url.to_string(),
            issue_number: target.number,
            issue_title: target.title,
        };

        match self.scope_and_implement(&ctx, cancel).await {
            Ok((scoped, executed)) => {
                info!(issue = ctx.issue_number, "Issue implemented");
                Outcome::success(ctx.issue_number, scoped, executed)
            }
            Err(err) => {
                warn!(issue = ctx.issue_number, error = %err, "Issue failed");
                Outcome::failed(ctx.issue_number, err.outcome_message())
            }
        }
    }

    async fn scope_and_implement(
        &self,
        ctx: &SessionContext,
        cancel: &CancellationToken,
    ) -> Result<(StructuredOutput, StructuredOutput), SessionError> {
        let scoped = self.launcher.scope(ctx, cancel).await?;

        let plan = ActionPlan::from_structured_output(&scoped).ok_or_else(|| {
            SessionError::InvalidResult("Scoper did not return a valid action_plan".to_string())
        })?;
        info!(issue = ctx.issue_number, steps = plan.len(), "Issue scoped");

        let executed = self.launcher.implement(ctx, &plan, cancel).await?;
        Ok((scoped, executed))
    }
}

/// Resolves the selection against the snapshot, in processing order
fn resolve_targets<'a>(
    selection: &TargetSelection,
    snapshot: &'a RepoSnapshot,
) -> Result<Vec<&'a Issue>, BatchError> {
    match selection {
        TargetSelection::All => Ok(snapshot
            .values()
            .filter(|issue| !issue.is_pull_request())
            .collect()),
        TargetSelection::Explicit(numbers) => numbers
            .iter()
            .map(|n| snapshot.get(n).ok_or(BatchError::IssueNotFound(*n)))
            .collect(),
    }
}
