//! Error types for the Swarm client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Swarm client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if the orchestrator could not reach the agent API or the issue tracker
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, Self::ApiError { status: 502, .. })
    }

    /// Message to show a user, without the status code wrapper
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(ClientError::api_error(404, "Repository 'x' not found").is_not_found());
        assert!(ClientError::api_error(502, "GitHub API error").is_upstream_error());
        assert!(!ClientError::api_error(500, "boom").is_not_found());
    }

    #[test]
    fn test_user_message_strips_status() {
        let err = ClientError::api_error(404, "Issue #9 not found");
        assert_eq!(err.user_message(), "Issue #9 not found");
        assert_eq!(err.to_string(), "API error (status 404): Issue #9 not found");
    }
}
