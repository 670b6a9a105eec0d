//! Batch API Handler
//!
//! Entry point of the scope-and-implement engine.

use axum::{
    Json,
    extract::{Path, State},
};
use swarm_core::domain::outcome::BatchResult;
use swarm_core::dto::batch::BatchRequest;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// POST /{repo}/issues/scope-and-execute-batch
/// Scope and implement all issues of a repository, or the listed ones
///
/// The issue listing is fetched and cached first, so targets are resolved
/// against the tracker's current state. The response is 200 whenever the batch
/// ran; per-issue failures are reported inside `results`.
pub async fn scope_and_execute_batch(
    State(state): State<AppState>,
    Path(repo): Path<String>,
    Json(req): Json<BatchRequest>,
) -> ApiResult<Json<BatchResult>> {
    tracing::info!("Batch requested for repo {}: {:?}", repo, req);

    let issues = state.issues.fetch_issues(&repo).await?;
    if issues.is_empty() {
        return Err(ApiError::NotFound(format!(
            "The repository '{}' has no issues",
            repo
        )));
    }

    let snapshot = state.store.replace(&repo, issues);
    let cancel = state.shutdown.child_token();

    let result = state
        .orchestrator
        .run(&repo, &req.selection(), &snapshot, &cancel)
        .await?;

    Ok(Json(result))
}
