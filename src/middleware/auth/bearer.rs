//! access token (HS256 JWT) 検証 → RequestContext を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` 以外は "missing token" クラスで 401
//! - 署名不一致 / 期限切れ / 壊れたトークンは "invalid token" クラスで 401
//! - 成功時のみ Principal を載せて downstream handler へ進む

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};

use crate::api::v1::extractors::{Principal, RequestContext};
use crate::error::AppError;
use crate::middleware::auth::AuthError;
use crate::state::AppState;

const BEARER_PREFIX: &[u8] = b"Bearer ";

/// Returns the raw token after the case-sensitive `Bearer ` prefix.
///
/// The prefix is matched on bytes: once it is there the credential counts as present, and a
/// remainder that is not UTF-8 is a malformed token rather than a missing one.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorizationHeader)?;

    let token = value
        .as_bytes()
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedAuthorizationHeader)?;

    std::str::from_utf8(token).map_err(|_| AuthError::TokenMalformed)
}

fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Principal, AuthError> {
    let token = bearer_token(headers)?;
    let claims = state.verifier.verify(token)?;

    tracing::debug!(
        user_id = %claims.user_id,
        expires_at = ?claims.expires_at(),
        "access token verified"
    );

    Ok(Principal::from(claims))
}

pub async fn auth_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let principal = match authenticate(&state, req.headers()) {
        Ok(principal) => principal,
        Err(err) => {
            tracing::warn!(
                error = %err,
                method = %req.method(),
                uri = %req.uri(),
                "request rejected by auth gate"
            );
            let message = state.auth_messages.message_for(err.class());
            return Err(AppError::unauthorized(message));
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(RequestContext::new(principal));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn missing_header() {
        assert_eq!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingAuthorizationHeader)
        );
    }

    #[test]
    fn non_bearer_schemes_are_malformed() {
        for value in ["Basic dXNlcjpwYXNz", "bearer abc", "Bearer", "Token abc"] {
            assert_eq!(
                bearer_token(&headers_with(value)),
                Err(AuthError::MalformedAuthorizationHeader),
                "{value}"
            );
        }
    }

    #[test]
    fn strips_prefix_only() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        // an empty token is still "present"; the verifier rejects it
        assert_eq!(bearer_token(&headers_with("Bearer ")), Ok(""));
    }

    #[test]
    fn undecodable_bytes_after_prefix_are_a_malformed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert_eq!(bearer_token(&headers), Err(AuthError::TokenMalformed));
    }

    #[test]
    fn undecodable_bytes_without_prefix_are_a_malformed_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"B\xe9arer token").unwrap(),
        );
        assert_eq!(
            bearer_token(&headers),
            Err(AuthError::MalformedAuthorizationHeader)
        );
    }
}
