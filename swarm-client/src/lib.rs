//! Swarm HTTP Client
//!
//! A simple, type-safe HTTP client for the Swarm orchestrator API.
//!
//! # Example
//!
//! ```no_run
//! use swarm_client::SwarmClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SwarmClient::new("http://127.0.0.1:8000");
//!
//!     let list = client.list_issues("my-repo").await?;
//!     for issue in list.issues.unwrap_or_default() {
//!         println!("#{} {}", issue.number, issue.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
mod batch;
mod issues;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the Swarm orchestrator API
///
/// Covers issue browsing and the scope-and-execute batch endpoint.
#[derive(Debug, Clone)]
pub struct SwarmClient {
    /// Base URL of the orchestrator (e.g., "http://127.0.0.1:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl SwarmClient {
    /// Create a new orchestrator client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the orchestrator API (e.g., "http://127.0.0.1:8000")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new orchestrator client with a custom HTTP client
    ///
    /// Batches can run for a long time; a client built with a request timeout
    /// must allow for scope and implement sessions of every selected issue.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the orchestrator
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn repo_url(&self, repo: &str) -> String {
        format!("{}/{}/issues", self.base_url, repo)
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Error bodies of the orchestrator carry an `error` field; its text becomes
    /// the error message.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!("Orchestrator returned {}: {}", status, error_text);
            return Err(ClientError::api_error(
                status.as_u16(),
                error_message(&error_text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Extracts the `error` field of a JSON error body, or returns the body as is
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
