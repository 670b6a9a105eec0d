//! Issue API Handlers
//!
//! Read-only views of a repository's issues. Listing refreshes the issue store.

use axum::{
    Json,
    extract::{Path, State},
};
use swarm_core::dto::issue::{IssueDetail, IssueList, IssueSummary};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// GET /{repo}/issues
/// Fetch the issue listing, cache it, and return the entries that are not pull requests
pub async fn list_issues(
    State(state): State<AppState>,
    Path(repo): Path<String>,
) -> ApiResult<Json<IssueList>> {
    tracing::debug!("Listing issues for repo: {}", repo);

    let issues = state.issues.fetch_issues(&repo).await?;

    if issues.is_empty() {
        state.store.replace(&repo, issues);
        return Ok(Json(IssueList {
            issues: None,
            message: Some(format!("The repository '{}' has no issues", repo)),
        }));
    }

    let summaries: Vec<IssueSummary> = issues
        .iter()
        .filter(|issue| !issue.is_pull_request())
        .map(IssueSummary::from)
        .collect();

    state.store.replace(&repo, issues);

    Ok(Json(IssueList {
        issues: Some(summaries),
        message: None,
    }))
}

/// GET /{repo}/issues/{issue_number}
/// Show one cached issue, after checking the repository still exists
pub async fn get_issue(
    State(state): State<AppState>,
    Path((repo, issue_number)): Path<(String, u64)>,
) -> ApiResult<Json<IssueDetail>> {
    tracing::debug!("Getting issue #{} of repo: {}", issue_number, repo);

    let issues = state.issues.fetch_issues(&repo).await?;
    if issues.is_empty() {
        return Err(ApiError::NotFound(format!(
            "The repository '{}' has no issues",
            repo
        )));
    }

    let issue = state.store.get(&repo, issue_number).ok_or_else(|| {
        ApiError::NotFound(format!(
            "Issue not found. Issue doesn't exist or call /{}/issues",
            repo
        ))
    })?;

    if issue.is_pull_request() {
        return Err(ApiError::NotFound(
            "This is a pull request, not an issue".to_string(),
        ));
    }

    Ok(Json(IssueDetail::from(&issue)))
}
