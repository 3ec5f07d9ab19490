/*
 * Responsibility
 * - GET /me (auth gate 通過後の疎通用)
 * - RequestContext から Principal を読むだけ。body に秘密情報は載せない
 */
use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::api::v1::extractors::RequestCtx;

pub async fn me(RequestCtx(ctx): RequestCtx) -> impl IntoResponse {
    tracing::debug!(user_id = %ctx.principal().user_id, "me");

    Json(json!({ "success": true, "user": ctx.into_principal() }))
}
