//! Execution Service
//!
//! Relays a code snippet to the judge service and reports its output.
//!
//! The judge is polled exactly once, after a fixed delay. Submissions that
//! take longer than the delay come back with an in-progress status (e.g.
//! "Processing") and no output; there is no retry.

use std::sync::Arc;
use std::time::Duration;

use crate::config::JudgeSettings;
use crate::domain::{ExecutionRequest, ExecutionResult};
use crate::infrastructure::judge::{Judge0Client, JudgeClient, JudgeError, Submission};
use crate::infrastructure::metrics;

/// Execution failures. Both are terminal for the request.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("submission failed: {0}")]
    Submission(#[source] JudgeError),

    #[error("result fetch failed: {0}")]
    ResultFetch(#[source] JudgeError),
}

impl ExecutionError {
    /// Message exposed to API clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            ExecutionError::Submission(_) => "Failed to execute code",
            ExecutionError::ResultFetch(_) => "Failed to get execution result",
        }
    }
}

/// Execution gateway. Without a judge client it answers in demo mode.
pub struct ExecutionService {
    judge: Option<Arc<dyn JudgeClient>>,
    result_delay: Duration,
    default_language_id: i64,
}

impl ExecutionService {
    pub fn new(
        judge: Option<Arc<dyn JudgeClient>>,
        result_delay: Duration,
        default_language_id: i64,
    ) -> Self {
        Self {
            judge,
            result_delay,
            default_language_id,
        }
    }

    /// Build from settings; a missing or placeholder credential selects demo mode.
    pub fn from_settings(settings: &JudgeSettings) -> Result<Self, JudgeError> {
        let judge: Option<Arc<dyn JudgeClient>> = match settings.credential() {
            Some(key) => Some(Arc::new(Judge0Client::new(settings, key)?)),
            None => None,
        };

        Ok(Self::new(
            judge,
            Duration::from_millis(settings.result_delay_ms),
            settings.default_language_id,
        ))
    }

    /// Whether requests reach a real judge.
    pub fn is_live(&self) -> bool {
        self.judge.is_some()
    }

    pub fn default_language_id(&self) -> i64 {
        self.default_language_id
    }

    /// Submit, wait the fixed delay, fetch once.
    pub async fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Result<ExecutionResult, ExecutionError> {
        let Some(judge) = &self.judge else {
            tracing::warn!("No judge credential configured, returning mock response");
            metrics::record_execution("demo");
            return Ok(ExecutionResult::demo());
        };

        let submission = Submission {
            source_code: request.source_code,
            language_id: request.language_id,
            stdin: request.stdin,
        };

        let token = judge.submit(&submission).await.map_err(|e| {
            metrics::record_execution("submission_failed");
            ExecutionError::Submission(e)
        })?;

        tracing::debug!(
            token = %token.token,
            language_id = %submission.language_id,
            delay_ms = self.result_delay.as_millis() as u64,
            "Submission accepted, waiting before fetching result"
        );

        tokio::time::sleep(self.result_delay).await;

        let record = judge.fetch(&token).await.map_err(|e| {
            metrics::record_execution("result_failed");
            ExecutionError::ResultFetch(e)
        })?;

        metrics::record_execution("success");
        tracing::info!(
            token = %token.token,
            status = %record.status.description,
            "Execution result fetched"
        );

        Ok(ExecutionResult::from_streams(
            record.stdout,
            record.stderr,
            record.status.description,
        ))
    }
}
