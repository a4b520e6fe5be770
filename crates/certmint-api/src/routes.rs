//! Route configuration for the certificate API.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;
use crate::handlers::{issue_certificate, method_not_allowed};
use crate::state::AppState;

/// Path of the certificate issuance endpoint.
pub const CERTIFICATES_PATH: &str = "/api/certificates";

/// Create the API router.
///
/// CORS is only installed when origins are configured. The CORS layer answers
/// every OPTIONS request itself, which would otherwise shadow the 405 reply.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(state.config());

    let router = Router::new()
        .route(
            CERTIFICATES_PATH,
            post(issue_certificate).fallback(method_not_allowed),
        )
        .with_state(state);

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Build the CORS layer based on configuration. Origins that are not valid
/// header values are skipped; with none left there is no layer.
fn build_cors_layer(config: &ServerConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::POST])
            .allow_headers(Any),
    )
}
