//! Handler for redirect creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use tracing::error;
use validator::Validate;

use crate::api::dto::create::{CreateRedirectRequest, CreateRedirectResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_host::{base_domain_from_host, raw_host, short_url};
use crate::utils::target_url::sanitize_for_display;

/// Registers a target URL under a newly generated token.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "subdomain": "nkhf8idmvhen",
///   "url": "https://nkhf8idmvhen.short.test",
///   "originalUrl": "https://example.com/page"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if the body is not JSON or `url` is missing, empty or invalid
/// - 500 Internal Server Error if no free token was found, storage failed,
///   or the request exceeded the creation timeout
pub async fn create_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateRedirectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRedirectResponse>), AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppError::bad_request("Invalid JSON body", json!({ "reason": rejection.body_text() }))
    })?;
    payload.validate()?;

    let target_url = payload
        .url
        .ok_or_else(|| AppError::bad_request("URL is required", json!({})))?;

    let base_domain = match state.base_domain.as_deref() {
        Some(base) => base.to_string(),
        None => base_domain_from_host(raw_host(&headers)?, state.mode),
    };

    let token = tokio::time::timeout(
        state.create_timeout,
        state.token_service.generate_and_register(&target_url),
    )
    .await
    .map_err(|_| {
        error!(timeout = ?state.create_timeout, "Redirect creation timed out");
        AppError::internal(
            "Redirect creation timed out",
            json!({ "timeout_ms": state.create_timeout.as_millis() as u64 }),
        )
    })??;

    let response = CreateRedirectResponse {
        url: short_url(&state.public_scheme, &base_domain, &token, state.mode),
        subdomain: token,
        original_url: sanitize_for_display(target_url.trim()),
    };

    Ok((StatusCode::CREATED, Json(response)))
}
