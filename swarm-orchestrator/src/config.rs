//! Orchestrator configuration
//!
//! Connection settings for the agent API and the issue tracker, plus the
//! timing knobs of the poll engine.

use std::time::Duration;

use crate::service::{PollSettings, SessionTimeouts};

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Agent API base URL (e.g., "https://api.devin.ai/v1")
    pub agent_api_url: String,

    /// Bearer credential for the agent API
    pub agent_api_key: String,

    /// GitHub REST API base URL
    pub github_api_url: String,

    /// GitHub web URL, used to build the repository link given to agents
    pub github_web_url: String,

    /// Account owning the repositories
    pub github_owner: String,

    /// Optional bearer token for the GitHub API
    pub github_token: Option<String>,

    /// Address the HTTP API listens on
    pub bind_addr: String,

    /// Wait budget of a scope session
    pub scope_timeout: Duration,

    /// Wait budget of an implement session
    pub implement_timeout: Duration,

    /// First delay between two polls of a session
    pub poll_initial_backoff: Duration,

    /// Ceiling of the delay between two polls
    pub poll_max_backoff: Duration,

    /// Port of the local web frontend allowed by CORS
    pub cors_origin_port: u16,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(agent_api_key: String, github_owner: String) -> Self {
        let poll = PollSettings::default();
        let timeouts = SessionTimeouts::default();
        Self {
            agent_api_url: "https://api.devin.ai/v1".to_string(),
            agent_api_key,
            github_api_url: "https://api.github.com".to_string(),
            github_web_url: "https://github.com".to_string(),
            github_owner,
            github_token: None,
            bind_addr: "127.0.0.1:8000".to_string(),
            scope_timeout: timeouts.scope,
            implement_timeout: timeouts.implement,
            poll_initial_backoff: poll.initial_backoff,
            poll_max_backoff: poll.max_backoff,
            cors_origin_port: 5173,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - DEVIN_API_KEY (required)
    /// - GITHUB_OWNER (required)
    /// - DEVIN_API_URL (optional, default: https://api.devin.ai/v1)
    /// - GITHUB_TOKEN (optional)
    /// - GITHUB_API_URL (optional, default: https://api.github.com)
    /// - GITHUB_WEB_URL (optional, default: https://github.com)
    /// - SWARM_BIND_ADDR (optional, default: 127.0.0.1:8000)
    /// - SCOPE_TIMEOUT (optional, seconds, default: 600)
    /// - IMPLEMENT_TIMEOUT (optional, seconds, default: 900)
    /// - POLL_INITIAL_BACKOFF (optional, seconds, default: 10)
    /// - POLL_MAX_BACKOFF (optional, seconds, default: 30)
    /// - CORS_ORIGIN_PORT (optional, default: 5173)
    pub fn from_env() -> anyhow::Result<Self> {
        let agent_api_key = std::env::var("DEVIN_API_KEY")
            .map_err(|_| anyhow::anyhow!("DEVIN_API_KEY environment variable not set"))?;

        let github_owner = std::env::var("GITHUB_OWNER")
            .map_err(|_| anyhow::anyhow!("GITHUB_OWNER environment variable not set"))?;

        let defaults = Self::new(agent_api_key, github_owner);

        Ok(Self {
            agent_api_url: std::env::var("DEVIN_API_URL").unwrap_or(defaults.agent_api_url),
            github_api_url: std::env::var("GITHUB_API_URL").unwrap_or(defaults.github_api_url),
            github_web_url: std::env::var("GITHUB_WEB_URL").unwrap_or(defaults.github_web_url),
            github_token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            bind_addr: std::env::var("SWARM_BIND_ADDR").unwrap_or(defaults.bind_addr),
            scope_timeout: env_secs("SCOPE_TIMEOUT").unwrap_or(defaults.scope_timeout),
            implement_timeout: env_secs("IMPLEMENT_TIMEOUT").unwrap_or(defaults.implement_timeout),
            poll_initial_backoff: env_secs("POLL_INITIAL_BACKOFF")
                .unwrap_or(defaults.poll_initial_backoff),
            poll_max_backoff: env_secs("POLL_MAX_BACKOFF").unwrap_or(defaults.poll_max_backoff),
            cors_origin_port: std::env::var("CORS_ORIGIN_PORT")
                .ok()
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(defaults.cors_origin_port),
            ..defaults
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.agent_api_key.is_empty() {
            anyhow::bail!("agent_api_key cannot be empty");
        }

        if self.github_owner.is_empty() {
            anyhow::bail!("github_owner cannot be empty");
        }

        for (name, url) in [
            ("agent_api_url", &self.agent_api_url),
            ("github_api_url", &self.github_api_url),
            ("github_web_url", &self.github_web_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.scope_timeout.is_zero() || self.implement_timeout.is_zero() {
            anyhow::bail!("session timeouts must be greater than 0");
        }

        if self.poll_initial_backoff.is_zero() {
            anyhow::bail!("poll_initial_backoff must be greater than 0");
        }

        if self.poll_max_backoff < self.poll_initial_backoff {
            anyhow::bail!("poll_max_backoff cannot be lower than poll_initial_backoff");
        }

        Ok(())
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            initial_backoff: self.poll_initial_backoff,
            max_backoff: self.poll_max_backoff,
        }
    }

    pub fn session_timeouts(&self) -> SessionTimeouts {
        SessionTimeouts {
            scope: self.scope_timeout,
            implement: self.implement_timeout,
        }
    }

    /// Web URL under which the owner's repositories live
    pub fn repo_base_url(&self) -> String {
        format!(
            "{}/{}",
            self.github_web_url.trim_end_matches('/'),
            self.github_owner
        )
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new("key".to_string(), "octo".to_string())
    }

    #[test]
    fn test_default_config() {
        let config = config();
        assert_eq!(config.scope_timeout, Duration::from_secs(600));
        assert_eq!(config.implement_timeout, Duration::from_secs(900));
        assert_eq!(config.poll_settings(), PollSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        config.agent_api_key = String::new();
        assert!(config.validate().is_err());
        config.agent_api_key = "key".to_string();

        config.github_api_url = "api.github.com".to_string();
        assert!(config.validate().is_err());
        config.github_api_url = "https://api.github.com".to_string();

        config.poll_max_backoff = Duration::from_secs(5);
        assert!(config.validate().is_err());
        config.poll_max_backoff = Duration::from_secs(30);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_repo_base_url() {
        let mut config = config();
        config.github_web_url = "https://github.com/".to_string();
        assert_eq!(config.repo_base_url(), "https://github.com/octo");
    }
}
