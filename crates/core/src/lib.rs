//! Shared domain types for the courier API server and queue worker.
//!
//! This crate has no internal dependencies so both processes (and any
//! tooling) can use it without pulling in the database or mail stacks.

pub mod error;
pub mod payloads;
pub mod task_types;
pub mod types;
pub mod verification;
