//! Session launcher
//!
//! Turns an issue into an agent session: renders the prompt for the job kind,
//! submits it, and waits on the poll engine for the kind's result.

use std::sync::Arc;
use std::time::Duration;

use swarm_core::domain::job::{Job, JobKind, StructuredOutput};
use swarm_core::domain::plan::ActionPlan;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::repository::AgentRepository;
use crate::service::error::SessionError;
use crate::service::poll::PollEngine;

/// Issue a session works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub repo_url: String,
    pub issue_number: u64,
    pub issue_title: String,
}

/// Default wait budget per job kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimeouts {
    pub scope: Duration,
    pub implement: Duration,
}

impl Default for SessionTimeouts {
    fn default() -> Self {
        Self {
            scope: Duration::from_secs(600),
            implement: Duration::from_secs(900),
        }
    }
}

impl SessionTimeouts {
    pub fn for_kind(&self, kind: JobKind) -> Duration {
        match kind {
            JobKind::Scope => self.scope,
            JobKind::Implement => self.implement,
        }
    }
}

/// What to ask the agent for
#[derive(Debug, Clone, Copy)]
pub enum SessionRequest<'a> {
    Scope(&'a SessionContext),
    Implement(&'a SessionContext, &'a ActionPlan),
}

impl SessionRequest<'_> {
    pub fn kind(&self) -> JobKind {
        match self {
            SessionRequest::Scope(_) => JobKind::Scope,
            SessionRequest::Implement(..) => JobKind::Implement,
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            SessionRequest::Scope(ctx) => scope_prompt(ctx),
            SessionRequest::Implement(ctx, plan) => implement_prompt(ctx, plan),
        }
    }
}

fn scope_prompt(ctx: &SessionContext) -> String {
    let n = ctx.issue_number;
    let title = &ctx.issue_title;
    format!(
        r#"
Hey devin. Your task is to scope the GitHub issue #{n} titled "{title}" in the repository {repo_url}.
Return ONLY valid JSON in this exact shape:
{{
  "issue_number": "{n}",
  "issue_title": "{title}",
  "summary": "<one-sentence scope of the issue>",
  "confidence_score": "Low | Medium | High",
  "action_plan": [
    "<step 1>",
    "<step 2>",
    "<step 3>"
  ]
}}
"#,
        repo_url = ctx.repo_url,
    )
}

fn implement_prompt(ctx: &SessionContext, plan: &ActionPlan) -> String {
    let n = ctx.issue_number;
    format!(
        r#"
Hey Devin. Your task is to take a given action plan and complete the ticket for the specified repository.
Repo: {repo_url}
Issue #{n} titled: "{title}"


Action plan:
{plan}

Additionally, please:

1) Create and checkout branch: "devin/issue-{n}-[short_title]" (The short_title should be derived from the issue title.)
2) Implement changes with clear commits mentioning "{n}-[short_title]"
3) Push the branch
4) Open a Pull Request referencing the issue number #{n} in the title/body
"#,
        repo_url = ctx.repo_url,
        title = ctx.issue_title,
        plan = plan.to_bullets(),
    )
}

/// Launches agent sessions and waits for their structured output
#[derive(Clone)]
pub struct SessionLauncher {
    agent: Arc<dyn AgentRepository>,
    poller: PollEngine,
    timeouts: SessionTimeouts,
}

impl SessionLauncher {
    pub fn new(agent: Arc<dyn AgentRepository>, poller: PollEngine, timeouts: SessionTimeouts) -> Self {
        Self {
            agent,
            poller,
            timeouts,
        }
    }

    /// Runs a session with the default timeout of its kind
    pub async fn launch(
        &self,
        request: SessionRequest<'_>,
        cancel: &CancellationToken,
    ) -> Result<StructuredOutput, SessionError> {
        let timeout = self.timeouts.for_kind(request.kind());
        self.launch_with_timeout(request, timeout, cancel).await
    }

    /// Runs a session and returns its structured output.
    ///
    /// A session that ends without output yields an empty mapping; callers decide
    /// whether that is usable. `timeout` covers session creation and polling together.
    pub async fn launch_with_timeout(
        &self,
        request: SessionRequest<'_>,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<StructuredOutput, SessionError> {
        let kind = request.kind();
        let prompt = request.prompt();

        let started = Instant::now();
        let created = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(SessionError::Cancelled),
            res = tokio::time::timeout(timeout, self.agent.create_session(&prompt)) => res,
        };
        let id = match created {
            Ok(res) => res.map_err(SessionError::Create)?,
            Err(_) => return Err(SessionError::CreateTimeout { kind, waited: timeout }),
        };

        let job = Job {
            id,
            kind,
            prompt,
            created_at: chrono::Utc::now(),
        };
        info!(session = %job.id, kind = %job.kind, timeout_secs = timeout.as_secs(), "Created agent session");

        let remaining = timeout.saturating_sub(started.elapsed());
        let status = self.poller.wait(&job, remaining, cancel).await?;
        Ok(status.into_structured_output())
    }

    pub async fn scope(
        &self,
        ctx: &SessionContext,
        cancel: &CancellationToken,
    ) -> Result<StructuredOutput, SessionError> {
        self.launch(SessionRequest::Scope(ctx), cancel).await
    }

    pub async fn implement(
        &self,
        ctx: &SessionContext,
        plan: &ActionPlan,
        cancel: &CancellationToken,
    ) -> Result<StructuredOutput, SessionError> {
        self.launch(SessionRequest::Implement(ctx, plan), cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::poll::PollSettings;
    use crate::testing::{Script, ScriptedAgent, Step, plan_status, pr_status, status};
    use serde_json::json;

    fn ctx() -> SessionContext {
        SessionContext {
            repo_url: "https://github.com/octo/repo".to_string(),
            issue_number: 7,
            issue_title: "Crash on start".to_string(),
        }
    }

    fn launcher(agent: &Arc<ScriptedAgent>) -> SessionLauncher {
        let poller = PollEngine::new(agent.clone(), PollSettings::default());
        SessionLauncher::new(agent.clone(), poller, SessionTimeouts::default())
    }

    #[test]
    fn test_scope_prompt() {
        let prompt = SessionRequest::Scope(&ctx()).prompt();
        assert!(prompt.contains(
            r#"scope the GitHub issue #7 titled "Crash on start" in the repository https://github.com/octo/repo."#
        ));
        assert!(prompt.contains(r#""issue_number": "7","#));
        assert!(prompt.contains(r#""action_plan": ["#));
    }

    #[test]
    fn test_implement_prompt_lists_plan() {
        let plan = ActionPlan::normalize(&[json!("reproduce"), json!("fix")]).unwrap();
        let prompt = SessionRequest::Implement(&ctx(), &plan).prompt();
        assert!(prompt.contains("Repo: https://github.com/octo/repo"));
        assert!(prompt.contains("Action plan:\n- reproduce\n- fix\n"));
        assert!(prompt.contains(r#"branch: "devin/issue-7-[short_title]""#));
        assert!(prompt.contains("referencing the issue number #7"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = SessionRequest::Scope(&ctx()).prompt();
        let b = SessionRequest::Scope(&ctx()).prompt();
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_timeouts() {
        let timeouts = SessionTimeouts::default();
        assert!(timeouts.for_kind(JobKind::Scope) < timeouts.for_kind(JobKind::Implement));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scope_returns_structured_output() {
        let agent = Arc::new(ScriptedAgent::new(vec![Script::Steps(vec![
            Step::Status(status("working", None)),
            Step::Status(plan_status("working", &["a"])),
        ])]));

        let output = launcher(&agent)
            .scope(&ctx(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output["action_plan"], json!(["a"]));
        assert_eq!(agent.created_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_without_output_yields_empty_mapping() {
        let agent = Arc::new(ScriptedAgent::new(vec![Script::Steps(vec![Step::Status(status(
            "expired", None,
        ))])]));

        let output = launcher(&agent)
            .scope(&ctx(), &CancellationToken::new())
            .await
            .unwrap();

        assert!(output.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_creation_failure_is_remote_and_not_polled() {
        let agent = Arc::new(ScriptedAgent::new(vec![Script::CreateFails(401, "bad key")]));

        let err = launcher(&agent)
            .scope(&ctx(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Create(_)));
        assert_eq!(agent.poll_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_call_timeout() {
        let agent = Arc::new(ScriptedAgent::new(vec![Script::Steps(vec![Step::Status(status(
            "running", None,
        ))])]));
        let plan = ActionPlan::normalize(&[json!("a")]).unwrap();

        let err = launcher(&agent)
            .launch_with_timeout(
                SessionRequest::Implement(&ctx(), &plan),
                Duration::from_secs(30),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        // 10 + 20 reaches the 30s budget
        assert!(matches!(err, SessionError::Timeout { kind: JobKind::Implement, .. }));
        assert_eq!(agent.poll_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_creation_times_out() {
        let agent = Arc::new(ScriptedAgent::new(vec![Script::CreateHangs]));
        let started = tokio::time::Instant::now();

        let err = launcher(&agent)
            .launch_with_timeout(
                SessionRequest::Scope(&ctx()),
                Duration::from_secs(45),
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::CreateTimeout { kind: JobKind::Scope, .. }));
        assert!(err.outcome_message().starts_with("Timeout: "));
        assert_eq!(started.elapsed(), Duration::from_secs(45));
        assert_eq!(agent.poll_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_implement_waits_for_pull_request() {
        let agent = Arc::new(ScriptedAgent::new(vec![Script::Steps(vec![
            Step::Status(plan_status("working", &["a"])),
            Step::Status(pr_status("working", "https://github.com/octo/repo/pull/3")),
        ])]));
        let plan = ActionPlan::normalize(&[json!("a")]).unwrap();

        let output = launcher(&agent)
            .implement(&ctx(), &plan, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(output["pull_request_url"], "https://github.com/octo/repo/pull/3");
        assert_eq!(agent.poll_count(), 2);
    }
}
