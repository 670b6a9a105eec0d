//! Data Transfer Objects for the orchestrator HTTP API

pub mod batch;
pub mod issue;
