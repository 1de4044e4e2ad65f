//! Request logging and the Prometheus scrape endpoint.

use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, Span, field, info, info_span, warn};
use uuid::Uuid;

use super::AppState;
use super::auth::AuthenticatedEmail;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// GET /metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Coarse result of a request as seen by the caller.
fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "failed"
    } else if status.is_client_error() {
        "rejected"
    } else {
        "ok"
    }
}

/// Runs the request inside a `request` span, then records one
/// "Request finished" event and the HTTP metrics.
///
/// The token email is read back from the response, so it is attached to
/// this span no matter which span is current while the gate runs.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        route = %route,
        token_email = field::Empty,
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    let status = response.status();
    let token_email = response
        .extensions()
        .get::<AuthenticatedEmail>()
        .map(|email| email.0.clone());
    if let Some(email) = &token_email {
        span.record("token_email", email.as_str());
    }

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let elapsed = start.elapsed();
    let labels = [
        ("method", method.to_string()),
        ("route", route),
        ("status", status.as_u16().to_string()),
        ("authenticated", token_email.is_some().to_string()),
    ];
    metrics::counter!("http_requests_total", &labels).increment(1);
    metrics::histogram!("http_request_duration_seconds", &labels).record(elapsed.as_secs_f64());

    log_finished(
        &span,
        status,
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
    );
    response
}

fn log_finished(span: &Span, status: StatusCode, duration_ms: u64) {
    let _entered = span.enter();
    let outcome = outcome(status);

    if status.is_server_error() {
        warn!(status = status.as_u16(), outcome, duration_ms, "Request finished");
    } else {
        info!(status = status.as_u16(), outcome, duration_ms, "Request finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt;

    #[test]
    fn outcome_follows_status_class() {
        assert_eq!(outcome(StatusCode::OK), "ok");
        assert_eq!(outcome(StatusCode::UNAUTHORIZED), "rejected");
        assert_eq!(outcome(StatusCode::SERVICE_UNAVAILABLE), "failed");
    }

    #[tokio::test]
    async fn every_response_carries_a_request_id() {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn(logging_middleware));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let id = response.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
    }
}
