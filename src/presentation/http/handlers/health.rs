//! Health Check Handlers
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe with relay and judge details

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::time::Instant;

use crate::shared::time::{iso_timestamp, now_iso};
use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// Basic health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// Detailed readiness response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub judge_mode: JudgeMode,
    pub relay: RelayHealth,
}

/// Whether `/run` reaches a real judge
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JudgeMode {
    Live,
    Demo,
}

/// Session relay statistics
#[derive(Debug, Serialize)]
pub struct RelayHealth {
    pub active_connections: usize,
    pub active_sessions: usize,
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    tracing::debug!("Health check received");
    Json(HealthResponse {
        status: "OK",
        message: "Server is running",
        timestamp: now_iso(),
    })
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe. The relay has no external dependencies and the judge is
/// only contacted per request, so this always answers 200.
pub async fn readiness(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let judge_mode = if state.executor.is_live() {
        JudgeMode::Live
    } else {
        JudgeMode::Demo
    };

    Json(ReadinessResponse {
        status: "ready",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: iso_timestamp(*SERVER_START_TIME),
        judge_mode,
        relay: RelayHealth {
            active_connections: state.gateway.connection_count(),
            active_sessions: state.gateway.session_count(),
        },
    })
}
