//! Code Execution Handler

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde_json::Value;

use crate::application::dto::{RunCodeRequest, RunCodeResponse};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Run a snippet on the judge service.
///
/// Answers after the judge result delay when a credential is configured,
/// immediately with a mock result otherwise.
pub async fn run_code(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RunCodeResponse>, AppError> {
    let body = parse_body(&headers, &body)?;

    let request = body.into_execution(state.executor.default_language_id());
    let result = state.executor.execute(request).await?;

    Ok(Json(result.into()))
}

/// Only `application/json` bodies are read; any other body counts as empty.
/// A JSON body that does not parse is a bad request.
fn parse_body(headers: &HeaderMap, body: &[u8]) -> Result<RunCodeRequest, AppError> {
    if !is_json(headers) || body.is_empty() {
        return Ok(RunCodeRequest::default());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
    Ok(RunCodeRequest::from_json(value))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}
