//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Spans are opened at `INFO` with method, URI and version. Responses are
/// logged at `INFO` with status and latency in milliseconds; 5xx responses are
/// additionally reported at `ERROR`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/abc123/docs version=HTTP/1.1}: finished processing request latency=1 ms status=302
/// INFO request{method=POST uri=/ version=HTTP/1.1}: finished processing request latency=4 ms status=201
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}
