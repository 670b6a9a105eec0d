//! Batch endpoint

use crate::SwarmClient;
use crate::error::Result;
use swarm_core::domain::outcome::BatchResult;
use swarm_core::dto::batch::BatchRequest;

impl SwarmClient {
    /// Scope and implement a batch of issues
    ///
    /// Returns once every selected issue has an outcome.
    ///
    /// # Example
    /// ```no_run
    /// # use swarm_client::SwarmClient;
    /// # use swarm_core::dto::batch::BatchRequest;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = SwarmClient::new("http://127.0.0.1:8000");
    /// let result = client.run_batch("my-repo", &BatchRequest::issues(vec![1, 3])).await?;
    /// println!("{} of {} succeeded", result.succeeded, result.total_selected);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_batch(&self, repo: &str, req: &BatchRequest) -> Result<BatchResult> {
        let url = format!("{}/scope-and-execute-batch", self.repo_url(repo));
        tracing::debug!("Running batch on {}: {:?}", repo, req);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }
}
