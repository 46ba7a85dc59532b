//! Code execution entities.
//!
//! Both types are transient: a request lives for one `/run` call and the
//! result is derived from the judge's submission record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output reported when the judge captured neither stdout nor stderr.
pub const NO_OUTPUT: &str = "No output";

/// Output returned when no judge credential is configured.
pub const DEMO_OUTPUT: &str = "Hello, World!\n[Mock response - set up Judge0 API key]";

/// Status returned alongside [`DEMO_OUTPUT`].
pub const DEMO_STATUS: &str = "success";

/// A snippet to run on the judge service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Source code as sent by the client. `None` means the field was absent
    /// and is left out of the submission; any other value is forwarded as-is.
    pub source_code: Option<Value>,
    /// Judge language identifier (71 = Python 3), forwarded as-is.
    pub language_id: Value,
    /// Always empty; interactive input is not supported.
    pub stdin: String,
}

impl ExecutionRequest {
    pub fn new(source_code: Option<Value>, language_id: impl Into<Value>) -> Self {
        Self {
            source_code,
            language_id: language_id.into(),
            stdin: String::new(),
        }
    }
}

/// Captured output of a finished (or timed-out) submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub output: String,
    pub status: String,
}

impl ExecutionResult {
    /// Pick stdout if non-empty, else stderr if non-empty, else [`NO_OUTPUT`].
    pub fn from_streams(
        stdout: Option<String>,
        stderr: Option<String>,
        status: impl Into<String>,
    ) -> Self {
        let output = stdout
            .filter(|s| !s.is_empty())
            .or_else(|| stderr.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| NO_OUTPUT.to_string());

        Self {
            output,
            status: status.into(),
        }
    }

    /// Placeholder result used when the gateway runs without a credential.
    pub fn demo() -> Self {
        Self {
            output: DEMO_OUTPUT.to_string(),
            status: DEMO_STATUS.to_string(),
        }
    }
}
