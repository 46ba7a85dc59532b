//! Judge client contract and wire types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Errors talking to the judge service.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("judge responded with status {0}")]
    Upstream(u16),
}

/// Submission body accepted by `POST /submissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_code: Option<Value>,
    pub language_id: Value,
    pub stdin: String,
}

/// Opaque handle for a pending submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionToken {
    pub token: String,
}

/// Submission record returned by `GET /submissions/{token}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionRecord {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionStatus {
    #[serde(default)]
    pub id: Option<i64>,
    pub description: String,
}

/// Two-call judge protocol: submit, then look up by token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Submit source code for execution.
    async fn submit(&self, submission: &Submission) -> Result<SubmissionToken, JudgeError>;

    /// Fetch the submission record for a token.
    async fn fetch(&self, token: &SubmissionToken) -> Result<SubmissionRecord, JudgeError>;
}
