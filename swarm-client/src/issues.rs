//! Issue browsing endpoints

use crate::SwarmClient;
use crate::error::Result;
use swarm_core::dto::issue::{IssueDetail, IssueList};

impl SwarmClient {
    /// List the open issues of a repository
    ///
    /// Also refreshes the orchestrator's cached listing, which `get_issue` reads.
    pub async fn list_issues(&self, repo: &str) -> Result<IssueList> {
        let response = self.client.get(self.repo_url(repo)).send().await?;

        self.handle_response(response).await
    }

    /// Get one issue of a repository
    ///
    /// # Arguments
    /// * `repo` - Repository name
    /// * `number` - Issue number
    pub async fn get_issue(&self, repo: &str, number: u64) -> Result<IssueDetail> {
        let url = format!("{}/{}", self.repo_url(repo), number);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
