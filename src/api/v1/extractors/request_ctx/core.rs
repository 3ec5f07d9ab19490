use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use super::RequestContext;

/// Handler で、 RequestContext を受け取るための extractor
/// auth gate が RequestContext を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（pipeline を通っていないルート）
pub struct RequestCtx(pub RequestContext);

impl<S> FromRequestParts<S> for RequestCtx
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(RequestCtx)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
