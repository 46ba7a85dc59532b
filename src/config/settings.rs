//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Credential value shipped in sample `.env` files; treated as "not configured".
pub const PLACEHOLDER_API_KEY: &str = "your_rapidapi_key_here";

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Judge service configuration
    pub judge: JudgeSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// WebSocket configuration
    pub websocket: WebSocketSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Judge0 (RapidAPI) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JudgeSettings {
    /// RapidAPI key. Absent means the execution gateway answers with a demo result.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the judge API, without trailing slash
    pub base_url: String,

    /// Value sent in the `X-RapidAPI-Host` header
    pub host: String,

    /// Language used when a run request carries no `language_id` (71 = Python 3)
    pub default_language_id: i64,

    /// Fixed wait between submission and result fetch, in milliseconds
    pub result_delay_ms: u64,

    /// Per-request timeout for judge calls, in seconds
    pub request_timeout_secs: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins. Empty allows any origin.
    pub allowed_origins: Vec<String>,
}

/// WebSocket configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketSettings {
    /// Maximum message size in bytes (default: 1MB)
    pub max_message_size: usize,

    /// Maximum frame size in bytes (default: 256KB)
    pub max_frame_size: usize,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml and config/{RUN_ENV}.toml
    /// 3. `APP__SECTION__KEY` environment variables
    /// 4. Plain variables (`PORT`, `HOST`, `RAPIDAPI_KEY`, `JUDGE_BASE_URL`, `JUDGE_HOST`)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());
        let defaults = Settings::default();

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("judge.base_url", defaults.judge.base_url)?
            .set_default("judge.host", defaults.judge.host)?
            .set_default("judge.default_language_id", defaults.judge.default_language_id)?
            .set_default("judge.result_delay_ms", defaults.judge.result_delay_ms as i64)?
            .set_default("judge.request_timeout_secs", defaults.judge.request_timeout_secs as i64)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("websocket.max_message_size", defaults.websocket.max_message_size as i64)?
            .set_default("websocket.max_frame_size", defaults.websocket.max_frame_size as i64)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=3001 -> server.port = 3001
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("HOST").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("judge.api_key", std::env::var("RAPIDAPI_KEY").ok())?
            .set_override_option("judge.base_url", std::env::var("JUDGE_BASE_URL").ok())?
            .set_override_option("judge.host", std::env::var("JUDGE_HOST").ok())?
            .build()?
            .try_deserialize()
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".into(),
                port: 3001,
            },
            judge: JudgeSettings {
                api_key: None,
                base_url: "https://judge0-ce.p.rapidapi.com".into(),
                host: "judge0-ce.p.rapidapi.com".into(),
                default_language_id: 71,
                result_delay_ms: 2000,
                request_timeout_secs: 30,
            },
            cors: CorsSettings {
                allowed_origins: Vec::new(),
            },
            websocket: WebSocketSettings {
                max_message_size: 1024 * 1024,
                max_frame_size: 256 * 1024,
            },
            environment: "development".into(),
        }
    }
}

impl JudgeSettings {
    /// The configured credential, if it is a real one.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    /// Judge base URL with any trailing slash removed.
    pub fn endpoint(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
