//! Route tables for the two redirect modes.
//!
//! Both modes share `POST /` for creation. Static routes take precedence over
//! captures, so `/health` is never treated as a token; `health` is also never
//! issued as a token.

use crate::api::handlers::{
    create_handler, path_redirect_handler, path_redirect_with_rest_handler, path_root_handler,
    subdomain_redirect_handler, subdomain_redirect_with_rest_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes for path mode.
///
/// # Endpoints
///
/// - `POST /`                  - Register a target URL
/// - `GET  /`                  - Always 404 (empty token)
/// - `GET  /{token}`           - Redirect
/// - `GET  /{token}/{*rest}`   - Redirect, forwarding `rest` as extra path
pub fn path_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(path_root_handler).post(create_handler))
        .route("/{token}", get(path_redirect_handler))
        .route("/{token}/{*rest}", get(path_redirect_with_rest_handler))
}

/// Routes for subdomain mode; the token is read from the `Host` header.
///
/// # Endpoints
///
/// - `POST /`          - Register a target URL
/// - `GET  /`          - Redirect
/// - `GET  /{*rest}`   - Redirect, forwarding the request path as extra path
pub fn subdomain_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(subdomain_redirect_handler).post(create_handler))
        .route("/{*rest}", get(subdomain_redirect_with_rest_handler))
}
