//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: Storage unreachable
///
/// A disabled cache is reported but never degrades the service; an enabled
/// cache that fails its PING does, since lookups then hit storage directly.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Connected, 42 redirects" },
///     "cache": { "status": "ok", "message": "redis connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;

    let cache_check = check_cache(&state).await;

    let all_healthy = storage_check.is_ok() && cache_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
            cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks storage connectivity and reports the number of stored redirects.
async fn check_storage(state: &AppState) -> CheckStatus {
    if let Err(e) = state.repository.health_check().await {
        return CheckStatus::error(format!("Storage error: {}", e));
    }

    match state.repository.count().await {
        Ok(count) => CheckStatus::ok(format!("Connected, {} redirects", count)),
        Err(e) => CheckStatus::error(format!("Storage error: {}", e)),
    }
}

/// Checks cache connectivity via PING command.
async fn check_cache(state: &AppState) -> CheckStatus {
    let backend = state.cache.backend();

    if backend == "disabled" {
        return CheckStatus::ok("Cache disabled");
    }

    if state.cache.health_check().await {
        CheckStatus::ok(format!("{} connected", backend))
    } else {
        CheckStatus::error(format!("{} connection failed", backend))
    }
}
