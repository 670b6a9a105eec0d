//! In-memory repository stubs shared by the orchestrator tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};
use swarm_core::domain::issue::Issue;
use swarm_core::domain::job::SessionStatus;

use crate::repository::{AgentError, AgentRepository, IssueRepository, IssueSourceError};

/// One answer to a status poll
#[derive(Debug, Clone)]
pub enum Step {
    Status(SessionStatus),
    Fails(u16, &'static str),
    /// The request never gets an answer
    Hangs,
}

/// Behaviour of one created session
#[derive(Debug, Clone)]
pub enum Script {
    /// Polls walk through the steps; the last one repeats forever
    Steps(Vec<Step>),
    /// Session creation itself is rejected
    CreateFails(u16, &'static str),
    /// Session creation never gets an answer
    CreateHangs,
}

#[derive(Default)]
struct AgentState {
    queued: VecDeque<Script>,
    answer_by_prompt: bool,
    sessions: HashMap<String, VecDeque<Step>>,
    prompts: Vec<String>,
    polls: usize,
}

/// Agent stub answering from pre-recorded scripts
pub struct ScriptedAgent {
    state: Mutex<AgentState>,
}

impl ScriptedAgent {
    /// Each created session consumes the next script in order
    pub fn new(scripts: Vec<Script>) -> Self {
        Self {
            state: Mutex::new(AgentState {
                queued: scripts.into(),
                ..Default::default()
            }),
        }
    }

    /// Scope sessions return a two-step plan, implement sessions a pull request
    pub fn succeeding() -> Self {
        Self {
            state: Mutex::new(AgentState {
                answer_by_prompt: true,
                ..Default::default()
            }),
        }
    }

    /// A single already-created session with id `session-1`
    pub fn session(steps: Vec<Step>) -> Self {
        let agent = Self::new(vec![]);
        agent
            .state
            .lock()
            .unwrap()
            .sessions
            .insert("session-1".to_string(), steps.into());
        agent
    }

    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }

    pub fn created_count(&self) -> usize {
        self.state.lock().unwrap().prompts.len()
    }

    pub fn poll_count(&self) -> usize {
        self.state.lock().unwrap().polls
    }
}

impl ScriptedAgent {
    fn next_script(&self, prompt: &str) -> (String, Script) {
        let mut state = self.state.lock().unwrap();
        state.prompts.push(prompt.to_string());
        let id = format!("session-{}", state.prompts.len());

        let script = match state.queued.pop_front() {
            Some(script) => script,
            None if state.answer_by_prompt && prompt.contains("scope the GitHub issue") => {
                Script::Steps(vec![Step::Status(plan_status("running", &["step 1", "step 2"]))])
            }
            None if state.answer_by_prompt => Script::Steps(vec![Step::Status(pr_status(
                "running",
                "https://github.com/octo/repo/pull/1",
            ))]),
            None => Script::CreateFails(500, "no script left"),
        };

        if let Script::Steps(steps) = &script {
            state.sessions.insert(id.clone(), steps.clone().into());
        }
        (id, script)
    }

    fn next_step(&self, session_id: &str) -> Option<Step> {
        let mut state = self.state.lock().unwrap();
        state.polls += 1;

        match state.sessions.get_mut(session_id) {
            Some(steps) if steps.len() > 1 => steps.pop_front(),
            Some(steps) => steps.front().cloned(),
            None => None,
        }
    }
}

#[async_trait]
impl AgentRepository for ScriptedAgent {
    async fn create_session(&self, prompt: &str) -> Result<String, AgentError> {
        match self.next_script(prompt) {
            (id, Script::Steps(_)) => Ok(id),
            (_, Script::CreateFails(status, message)) => Err(AgentError::Api {
                status,
                message: message.to_string(),
            }),
            (_, Script::CreateHangs) => std::future::pending().await,
        }
    }

    async fn get_session(&self, session_id: &str) -> Result<SessionStatus, AgentError> {
        match self.next_step(session_id) {
            Some(Step::Status(status)) => Ok(status),
            Some(Step::Fails(status, message)) => Err(AgentError::Api {
                status,
                message: message.to_string(),
            }),
            Some(Step::Hangs) => std::future::pending().await,
            None => Err(AgentError::Api {
                status: 404,
                message: format!("session {} not found", session_id),
            }),
        }
    }
}

/// Issue source stub with fixed listings per repository
#[derive(Default)]
pub struct StaticIssues {
    repos: HashMap<String, Vec<Issue>>,
    fetches: AtomicUsize,
}

impl StaticIssues {
    pub fn with_repo(mut self, repo: &str, issues: Vec<Issue>) -> Self {
        self.repos.insert(repo.to_string(), issues);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IssueRepository for StaticIssues {
    async fn fetch_issues(&self, repo: &str) -> Result<Vec<Issue>, IssueSourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.repos
            .get(repo)
            .cloned()
            .ok_or_else(|| IssueSourceError::NotFound(repo.to_string()))
    }
}

pub fn status(status_enum: &str, structured_output: Option<Value>) -> SessionStatus {
    SessionStatus {
        status_enum: Some(status_enum.to_string()),
        structured_output,
        ..Default::default()
    }
}

pub fn plan_status(status_enum: &str, steps: &[&str]) -> SessionStatus {
    status(
        status_enum,
        Some(json!({ "summary": "scoped", "confidence_score": "High", "action_plan": steps })),
    )
}

pub fn pr_status(status_enum: &str, url: &str) -> SessionStatus {
    status(
        status_enum,
        Some(json!({ "pull_request_url": url, "branch_name": "devin/issue-1-fix" })),
    )
}

pub fn issue(number: u64, title: &str) -> Issue {
    Issue {
        number,
        title: Some(title.to_string()),
        state: "open".to_string(),
        html_url: format!("http://x/{}", number),
        body: Some(format!("Body of {}", title)),
        pull_request: None,
    }
}

pub fn pull_request(number: u64, title: &str) -> Issue {
    Issue {
        pull_request: Some(json!({})),
        ..issue(number, title)
    }
}
