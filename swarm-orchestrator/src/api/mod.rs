//! API Module
//!
//! HTTP API layer for the orchestrator.
//! Each submodule handles endpoints for a specific domain.

pub mod batch;
pub mod error;
pub mod health;
pub mod issues;

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::repository::IssueRepository;
use crate::service::{BatchOrchestrator, IssueStore};

/// Shared state of all handlers
#[derive(Clone)]
pub struct AppState {
    pub issues: Arc<dyn IssueRepository>,
    pub store: Arc<IssueStore>,
    pub orchestrator: BatchOrchestrator,
    /// Cancelled on shutdown; every batch runs under a child token
    pub shutdown: CancellationToken,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState, cors_origin_port: u16) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Issue endpoints
        .route("/{repo}/issues", get(issues::list_issues))
        .route("/{repo}/issues/{issue_number}", get(issues::get_issue))
        // Batch endpoint
        .route(
            "/{repo}/issues/scope-and-execute-batch",
            post(batch::scope_and_execute_batch),
        )
        // Add state and middleware
        .with_state(state)
        .layer(localhost_cors(cors_origin_port))
        .layer(TraceLayer::new_for_http())
}

fn localhost_cors(port: u16) -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        format!("http://localhost:{}", port),
        format!("http://127.0.0.1:{}", port),
    ]
    .iter()
    .filter_map(|o| o.parse().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
