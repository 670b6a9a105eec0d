//! Repository layer
//!
//! Repositories are stateless HTTP clients for the two external services the
//! orchestrator depends on: the agent session API and the issue tracker.
//!
//! Both are trait-based so services can be tested against in-memory stubs.

mod agent;
mod issues;

// Re-export traits
pub use agent::{AgentError, AgentRepository};
pub use issues::{IssueRepository, IssueSourceError};

// Re-export implementations
pub use agent::HttpAgentRepository;
pub use issues::HttpIssueRepository;
