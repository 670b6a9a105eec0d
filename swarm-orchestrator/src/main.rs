use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod repository;
pub mod service;
#[cfg(test)]
mod testing;

use config::Config;
use repository::{HttpAgentRepository, HttpIssueRepository};
use service::{BatchOrchestrator, IssueStore, PollEngine, SessionLauncher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swarm_orchestrator=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Swarm Orchestrator...");

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    tracing::info!(
        agent_api = %config.agent_api_url,
        github_owner = %config.github_owner,
        scope_timeout_secs = config.scope_timeout.as_secs(),
        implement_timeout_secs = config.implement_timeout.as_secs(),
        "Configuration loaded"
    );

    let agent = Arc::new(HttpAgentRepository::new(
        &config.agent_api_url,
        &config.agent_api_key,
    ));
    let issues = Arc::new(HttpIssueRepository::new(
        &config.github_api_url,
        &config.github_owner,
        config.github_token.clone(),
    ));

    let poller = PollEngine::new(agent.clone(), config.poll_settings());
    let launcher = SessionLauncher::new(agent, poller, config.session_timeouts());
    let orchestrator = BatchOrchestrator::new(launcher, config.repo_base_url());

    let shutdown = CancellationToken::new();
    let state = api::AppState {
        issues,
        store: Arc::new(IssueStore::new()),
        orchestrator,
        shutdown: shutdown.clone(),
    };

    // Build router with all API endpoints
    let app = api::create_router(state, config.cors_origin_port);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    tracing::info!("Orchestrator stopped");
    Ok(())
}

/// Resolves on ctrl-c, after cancelling every running batch
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown requested, cancelling running batches");
    shutdown.cancel();
}
