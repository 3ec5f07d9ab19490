//! CORS gate for browser clients.
//!
//! Note:
//! - CORS is enforced by browsers. Native mobile apps and server-to-server calls are not
//!   restricted by CORS.
//! - This gate must be the first stage of the request pipeline, so preflights never reach
//!   authentication.
//!
//! Policy:
//! - One configured origin, WITH credentials (`Access-Control-Allow-Credentials: true`).
//! - The same four headers are written on every response: preflight, 401, and whatever the
//!   downstream handler returns (overriding anything a handler set).
//! - Any `OPTIONS` request is answered here with `200` and an empty body.

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{Config, ConfigError};

/// Pre-parsed CORS header values.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    pub fn new(origin: &str, methods: &str, headers: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::Invalid("CORS_ALLOWED_ORIGIN"))?,
            allow_methods: HeaderValue::from_str(methods)
                .map_err(|_| ConfigError::Invalid("CORS_ALLOWED_METHODS"))?,
            allow_headers: HeaderValue::from_str(headers)
                .map_err(|_| ConfigError::Invalid("CORS_ALLOWED_HEADERS"))?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            &config.cors_allowed_origin,
            &config.cors_allowed_methods,
            &config.cors_allowed_headers,
        )
    }
}

/// Apply the CORS gate to the given Router.
///
/// The header layers sit outside the preflight short-circuit, so preflight answers get them too.
pub fn apply(router: Router, policy: &CorsPolicy) -> Router {
    router
        .layer(middleware::from_fn(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            policy.allow_origin.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            policy.allow_methods.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            policy.allow_headers.clone(),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        ))
}

/// Answers every `OPTIONS` request with an empty 200; anything else goes on down the pipeline.
async fn preflight(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        tracing::debug!(uri = %req.uri(), "answering preflight");
        return (StatusCode::OK, Body::empty()).into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn policy() -> CorsPolicy {
        CorsPolicy::new(
            "https://app.example.com",
            "GET, POST, PUT, DELETE, OPTIONS",
            "Content-Type, Authorization",
        )
        .unwrap()
    }

    fn app() -> Router {
        // handler that tries to widen the origin itself
        let router = Router::new().route(
            "/resource",
            get(|| async {
                (
                    StatusCode::ACCEPTED,
                    [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "https://evil.example.com")],
                    "body",
                )
            }),
        );
        apply(router, &policy())
    }

    fn assert_policy_headers(res: &Response) {
        let headers = res.headers();
        assert_eq!(
            headers.get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN).iter().count(),
            1
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example.com"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn handler_responses_get_policy_headers_overriding_their_own() {
        let res = app()
            .oneshot(Request::get("/resource").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::ACCEPTED);
        assert_policy_headers(&res);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"body");
    }

    #[tokio::test]
    async fn options_is_answered_with_empty_200_and_policy_headers() {
        let res = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/resource")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        assert_policy_headers(&res);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn rejects_values_that_are_not_header_safe() {
        let err = CorsPolicy::new("https://app.example.com\n", "GET", "Authorization").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("CORS_ALLOWED_ORIGIN")));
    }
}
