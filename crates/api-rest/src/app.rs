//! Application builder and configuration.
//!
//! This module provides the main application builder that assembles
//! all routes, middleware, and state into an Axum router.

use crate::{
    config::ApiConfig,
    middleware::{logging_middleware, request_id_middleware},
    routes,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

/// Create the main application router with in-memory services
pub fn create_app(config: ApiConfig) -> Router {
    let state = AppState::new(config);
    build_router(state)
}

/// Assemble routes and middleware around an existing state
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();
    let cors = build_cors_layer(&config);

    Router::new()
        // Health check routes (no auth required)
        .merge(routes::health::routes())
        // API v1 routes
        .nest("/api/v1", routes::v1::routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(
            ServiceBuilder::new()
                // Tracing
                .layer(TraceLayer::new_for_http())
                // Compression
                .layer(CompressionLayer::new())
                // CORS
                .layer(cors)
                // Timeout
                .layer(TimeoutLayer::new(config.request_timeout()))
                // Custom middleware
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn(logging_middleware)),
        )
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
