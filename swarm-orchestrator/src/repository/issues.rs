//! Issue source repository
//!
//! Read-only access to the issue tracker's issue listing of a repository.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use swarm_core::domain::issue::Issue;
use thiserror::Error;

/// Errors returned by the issue source
#[derive(Debug, Error)]
pub enum IssueSourceError {
    #[error("Repository '{0}' not found")]
    NotFound(String),

    #[error("GitHub API error: {0}")]
    Remote(String),
}

impl From<reqwest::Error> for IssueSourceError {
    fn from(err: reqwest::Error) -> Self {
        IssueSourceError::Remote(err.to_string())
    }
}

/// Repository trait for issue listing
#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Lists the issues (and pull requests) of `repo`, in tracker order
    async fn fetch_issues(&self, repo: &str) -> Result<Vec<Issue>, IssueSourceError>;
}

/// GitHub REST implementation of IssueRepository
pub struct HttpIssueRepository {
    client: Client,
    api_url: String,
    owner: String,
    token: Option<String>,
}

impl HttpIssueRepository {
    /// Creates a new GitHub issue repository
    ///
    /// # Arguments
    /// * `api_url` - GitHub API base URL (e.g., "https://api.github.com")
    /// * `owner` - Account that owns the repositories
    /// * `token` - Optional bearer token
    pub fn new(api_url: impl Into<String>, owner: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            owner: owner.into(),
            token,
        }
    }

    fn issues_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/{}/issues", self.api_url, self.owner, repo)
    }
}

#[async_trait]
impl IssueRepository for HttpIssueRepository {
    async fn fetch_issues(&self, repo: &str) -> Result<Vec<Issue>, IssueSourceError> {
        let mut request = self
            .client
            .get(self.issues_url(repo))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", "swarm-orchestrator");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(IssueSourceError::NotFound(repo.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IssueSourceError::Remote(format!("{} - {}", status, body)));
        }

        response
            .json::<Vec<Issue>>()
            .await
            .map_err(|e| IssueSourceError::Remote(format!("Failed to parse issue list: {}", e)))
    }
}
