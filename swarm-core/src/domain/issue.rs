//! Issue tracker domain types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An entry from the issue tracker's issue listing
///
/// The listing also returns pull requests; those carry a `pull_request` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    /// Title used in prompts, falling back to `Issue #<n>`
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Issue #{}", self.number))
    }

    pub fn target(&self) -> IssueTarget {
        IssueTarget {
            number: self.number,
            title: self.display_title(),
        }
    }
}

/// An issue selected for a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueTarget {
    pub number: u64,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pull_request_marker() {
        let issue: Issue = serde_json::from_value(json!({
            "number": 2, "title": "PR B", "state": "open",
            "html_url": "http://x/2", "pull_request": {}
        }))
        .unwrap();
        assert!(issue.is_pull_request());

        let issue: Issue = serde_json::from_value(json!({
            "number": 1, "title": "Bug A", "state": "open", "html_url": "http://x/1"
        }))
        .unwrap();
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn test_missing_title_falls_back() {
        let issue: Issue = serde_json::from_value(json!({ "number": 9 })).unwrap();
        assert_eq!(issue.target().title, "Issue #9");
    }
}
