//! HTTP-level middleware (cross-cutting concerns).
//!
//! Transport/infrastructure concerns that apply to every route, regardless of API version.
//!
//! Responsibility:
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits
//! - Handler timeouts
//!
//! The two halves are applied at different depths of the pipeline, see `pipeline::apply`.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;
const HANDLER_TIMEOUT: Duration = Duration::from_secs(30);

/// Access log / tracing for all requests, preflights included.
pub fn apply_tracing(router: Router) -> Router {
    router.layer(TraceLayer::new_for_http())
}

/// Bound what a downstream handler may consume.
///
/// Defaults:
/// - Body limit: 1 MiB
/// - Timeout: 30 seconds
pub fn apply_limits(router: Router) -> Router {
    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            handle_layer_error(err)
        }))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(HANDLER_TIMEOUT));

    router.layer(layers)
}

fn handle_layer_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT.into_response()
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        AppError::Internal.into_response()
    }
}
