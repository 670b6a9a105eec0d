//! Service Module
//!
//! Business logic layer for the orchestrator.
//! Services drive agent sessions through the repositories and shape batch results.

pub mod batch;
pub mod error;
pub mod issue_store;
pub mod poll;
pub mod session;

pub use batch::BatchOrchestrator;
pub use error::{BatchError, SessionError};
pub use issue_store::{IssueStore, RepoSnapshot};
pub use poll::{PollEngine, PollSettings};
pub use session::{SessionLauncher, SessionTimeouts};
