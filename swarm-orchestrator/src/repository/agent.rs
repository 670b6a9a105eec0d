//! Agent session repository
//!
//! Handles communication with the remote agent service:
//! - Creating a session from a prompt
//! - Fetching the latest status snapshot of a session

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use swarm_core::domain::job::SessionStatus;
use thiserror::Error;

/// Errors returned by the agent service
#[derive(Debug, Error)]
pub enum AgentError {
    /// The service answered with an error-class status
    #[error("agent API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The request never got a response
    #[error("agent request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not what the service documents
    #[error("failed to parse agent response: {0}")]
    Parse(String),
}

/// Repository trait for agent session operations
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Creates a session running `prompt` and returns its id
    async fn create_session(&self, prompt: &str) -> Result<String, AgentError>;

    /// Fetches the current status snapshot of a session
    async fn get_session(&self, session_id: &str) -> Result<SessionStatus, AgentError>;
}

#[derive(Serialize)]
struct CreateSessionRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct CreateSessionResponse {
    session_id: String,
}

/// HTTP implementation of AgentRepository
pub struct HttpAgentRepository {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpAgentRepository {
    /// Creates a new HTTP agent repository
    ///
    /// # Arguments
    /// * `api_url` - Base URL of the agent API (e.g., "https://api.devin.ai/v1")
    /// * `api_key` - Bearer credential forwarded on every request
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url, api_key)
    }

    pub fn with_client(client: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AgentError> {
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AgentRepository for HttpAgentRepository {
    async fn create_session(&self, prompt: &str) -> Result<String, AgentError> {
        let url = format!("{}/sessions", self.api_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CreateSessionRequest { prompt })
            .send()
            .await?;

        let created: CreateSessionResponse = Self::handle_response(response).await?;
        Ok(created.session_id)
    }

    async fn get_session(&self, session_id: &str) -> Result<SessionStatus, AgentError> {
        let url = format!("{}/sessions/{}", self.api_url, session_id);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::handle_response(response).await
    }
}
