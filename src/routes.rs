//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /`         - Create a redirect
//! - `GET  /health`   - Health check: storage, cache
//! - redirect routes for the configured [`RedirectMode`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::config::RedirectMode;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router for the mode stored in `state`, without path normalization.
pub fn build_router(state: AppState) -> Router {
    let redirect_routes = match state.mode {
        RedirectMode::Path => api::routes::path_routes(),
        RedirectMode::Subdomain => api::routes::subdomain_routes(),
    };

    Router::new()
        .route("/health", get(health_handler))
        .merge(redirect_routes)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}
