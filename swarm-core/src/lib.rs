//! Swarm Core
//!
//! Core types for Swarm, the batch scope-and-implement orchestrator.
//!
//! This crate contains:
//! - Domain types: agent jobs, session snapshots, action plans, issues, outcomes
//! - DTOs: request and response bodies of the orchestrator HTTP API

pub mod domain;
pub mod dto;
