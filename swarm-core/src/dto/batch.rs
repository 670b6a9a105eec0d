//! Batch DTOs

use serde::{Deserialize, Serialize};

/// Body of `POST /{repo}/issues/scope-and-execute-batch`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Run on every known issue of the repository
    #[serde(default)]
    pub all: bool,
    /// Or run on these issue numbers, in this order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<u64>>,
}

impl BatchRequest {
    pub fn all() -> Self {
        Self {
            all: true,
            issues: None,
        }
    }

    pub fn issues(numbers: Vec<u64>) -> Self {
        Self {
            all: false,
            issues: Some(numbers),
        }
    }

    pub fn selection(&self) -> TargetSelection {
        if self.all {
            TargetSelection::All
        } else {
            TargetSelection::Explicit(self.issues.clone().unwrap_or_default())
        }
    }
}

/// Which issues a batch runs on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelection {
    /// Every cached issue that is not a pull request, ascending
    All,
    /// The given numbers in input order
    Explicit(Vec<u64>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_wins_over_issue_list() {
        let req: BatchRequest = serde_json::from_str(r#"{"all": true, "issues": [3]}"#).unwrap();
        assert_eq!(req.selection(), TargetSelection::All);
    }

    #[test]
    fn test_missing_fields_default_to_empty_selection() {
        let req: BatchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.selection(), TargetSelection::Explicit(vec![]));
    }
}
