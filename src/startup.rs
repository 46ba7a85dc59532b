//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use crate::application::services::ExecutionService;
use crate::config::Settings;
use crate::infrastructure::judge::JudgeError;
use crate::presentation::http::handlers::health;
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};
use crate::presentation::websocket::Gateway;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub gateway: Arc<Gateway>,
    pub executor: Arc<ExecutionService>,
}

impl AppState {
    pub fn new(settings: Settings, executor: ExecutionService) -> Self {
        Self {
            settings: Arc::new(settings),
            gateway: Arc::new(Gateway::new()),
            executor: Arc::new(executor),
        }
    }

    /// Build state with the judge client selected from settings
    pub fn from_settings(settings: Settings) -> Result<Self, JudgeError> {
        let executor = ExecutionService::from_settings(&settings.judge)?;
        Ok(Self::new(settings, executor))
    }
}

/// Router with tracing and CORS applied
pub fn build_router(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(logging::create_trace_layer())
            .layer(cors_layer),
    )
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let addr = settings.server_addr();
        let state = AppState::from_settings(settings)?;

        if state.executor.is_live() {
            tracing::info!("Judge credential configured, executions go to the judge service");
        } else {
            tracing::warn!("RAPIDAPI_KEY not set, /run will return mock responses");
        }

        let router = build_router(state);

        // Bind to address
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
