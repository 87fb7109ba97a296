//! Router assembly.
//!
//! Built here rather than in `main` so integration tests can drive the
//! exact production router in-process.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, middleware::from_fn_with_state, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::token;
use crate::routes;
use crate::state::AppState;

/// Assemble the full application router over `state`.
#[must_use]
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::router())
        .layer(from_fn_with_state(state.clone(), token::verify))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK. Returns 503 when
/// the database is not reachable. Always ready when running without a
/// pool (in-memory stores).
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let Some(pool) = state.pool() else {
        return StatusCode::OK;
    };
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support;

    use super::build;

    #[tokio::test]
    async fn liveness_answers_ok() {
        let app = build(test_support::memory_state());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        assert_eq!(bytes.as_ref(), b"ok");
    }

    #[tokio::test]
    async fn readiness_without_a_pool_is_ok() {
        let app = build(test_support::memory_state());

        let response = app
            .oneshot(
                Request::get("/health/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() {
        let app = build(test_support::memory_state());

        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
