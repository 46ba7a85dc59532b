//! Cross-origin policy shared by `/run`, the health endpoints and the `/ws` upgrade.
//!
//! Browser clients are served from other origins, so by default any origin
//! may call the relay. Only `GET` and `POST` are ever routed.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::CorsSettings;

/// Methods the relay answers.
const ALLOWED_METHODS: [Method; 2] = [Method::GET, Method::POST];

/// Build the CORS layer. An empty origin list allows any origin; unparsable
/// entries are skipped with a warning.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(&settings.allowed_origins))
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(AllowHeaders::mirror_request())
}

fn allowed_origins(configured: &[String]) -> AllowOrigin {
    let origins: Vec<HeaderValue> = configured
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}
