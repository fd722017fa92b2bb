//! Handlers for token redirects.

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::application::services::RedirectOutcome;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::{raw_host, subdomain_token};
use crate::utils::forwarding::RequestContext;

/// Redirects a path-carried token to its target.
///
/// # Endpoint
///
/// `GET /{token}`
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown or malformed.
/// Returns 500 Internal Server Error if storage is unreachable.
pub async fn path_redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let ctx = request_context(None, query, &headers);
    redirect(&state, &token, ctx).await
}

/// Handles a bare `GET /` in path mode, where the token is empty.
///
/// Always 404 Not Found; the empty token never reaches storage.
pub async fn path_root_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let ctx = request_context(None, query, &headers);
    redirect(&state, "", ctx).await
}

/// Redirects a path-carried token, forwarding the remaining path.
///
/// # Endpoint
///
/// `GET /{token}/{*rest}`
///
/// `GET /abc123/docs/intro?x=1` with target `https://example.com/base`
/// redirects to `https://example.com/base/docs/intro?x=1`.
pub async fn path_redirect_with_rest_handler(
    Path((token, rest)): Path<(String, String)>,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let ctx = request_context(Some(rest), query, &headers);
    redirect(&state, &token, ctx).await
}

/// Redirects a token carried as the leading `Host` label.
///
/// # Endpoint
///
/// `GET /` on `{token}.{base_domain}`
pub async fn subdomain_redirect_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = subdomain_token(raw_host(&headers)?, state.base_domain.as_deref());
    let ctx = request_context(None, query, &headers);
    redirect(&state, &token, ctx).await
}

/// Redirects a `Host`-carried token, forwarding the whole request path.
///
/// # Endpoint
///
/// `GET /{*rest}` on `{token}.{base_domain}`
pub async fn subdomain_redirect_with_rest_handler(
    Path(rest): Path<String>,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = subdomain_token(raw_host(&headers)?, state.base_domain.as_deref());
    let ctx = request_context(Some(rest), query, &headers);
    redirect(&state, &token, ctx).await
}

async fn redirect(state: &AppState, token: &str, ctx: RequestContext) -> Result<Response, AppError> {
    match state.redirect_service.resolve(token, &ctx).await {
        RedirectOutcome::Redirect { target, status } => {
            Ok((status, [(header::LOCATION, target.to_string())]).into_response())
        }
        RedirectOutcome::NotFound => Err(AppError::not_found(
            "Redirect not found",
            json!({ "token": token }),
        )),
        RedirectOutcome::InternalError => Err(AppError::internal(
            "Redirect resolution failed",
            json!({ "token": token }),
        )),
    }
}

/// Collects the parts of the inbound request that may be forwarded.
///
/// Header values that are not valid UTF-8 are skipped.
fn request_context(
    extra_path: Option<String>,
    query: Option<String>,
    headers: &HeaderMap,
) -> RequestContext {
    let mut ctx = RequestContext::new();
    ctx.extra_path = extra_path;
    ctx.query = query;
    ctx.headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    ctx
}
