//! Configuration module
//!
//! Handles CLI configuration including the orchestrator URL and the selected repository.

use anyhow::{Result, anyhow};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the orchestrator service
    pub server_url: String,

    /// Repository the commands act on
    pub repo: Option<String>,
}

impl Config {
    /// Selected repository, or an error telling how to select one
    pub fn repo(&self) -> Result<&str> {
        self.repo
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| anyhow!("No repo selected. Pass --repo <name> or set SWARM_REPO"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(repo: Option<&str>) -> Config {
        Config {
            server_url: "http://127.0.0.1:8000".to_string(),
            repo: repo.map(str::to_string),
        }
    }

    #[test]
    fn test_repo_selected() {
        assert_eq!(config(Some("my-repo")).repo().unwrap(), "my-repo");
    }

    #[test]
    fn test_missing_or_blank_repo() {
        assert!(config(None).repo().is_err());
        assert!(config(Some("  ")).repo().is_err());
    }
}
