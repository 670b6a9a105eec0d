//! Issue DTOs

use serde::{Deserialize, Serialize};

use crate::domain::issue::Issue;

/// Row of the issue listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub url: String,
}

impl From<&Issue> for IssueSummary {
    fn from(issue: &Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.display_title(),
            state: issue.state.clone(),
            url: issue.html_url.clone(),
        }
    }
}

/// Response of `GET /{repo}/issues`
///
/// An empty repository yields a message instead of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<IssueSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `GET /{repo}/issues/{number}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub state: String,
    pub url: String,
}

impl From<&Issue> for IssueDetail {
    fn from(issue: &Issue) -> Self {
        Self {
            number: issue.number,
            title: issue.display_title(),
            body: issue.body.clone().unwrap_or_default(),
            state: issue.state.clone(),
            url: issue.html_url.clone(),
        }
    }
}
