//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::ExecutionResult;

/// `POST /run` success body
#[derive(Debug, Serialize)]
pub struct RunCodeResponse {
    pub output: String,
    pub status: String,
}

impl From<ExecutionResult> for RunCodeResponse {
    fn from(result: ExecutionResult) -> Self {
        Self {
            output: result.output,
            status: result.status,
        }
    }
}
