//! Core domain types
//!
//! Shared between the orchestrator (which runs batches) and the client/CLI
//! (which display their results).

pub mod issue;
pub mod job;
pub mod outcome;
pub mod plan;
