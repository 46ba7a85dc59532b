//! Application Services
//!
//! Business logic sitting between the HTTP handlers and the judge client.

mod execution_service;

pub use execution_service::{ExecutionError, ExecutionService};
