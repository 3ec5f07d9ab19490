/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - CORS / Bearer の適用は middleware::pipeline 側 (ここでは route だけ)
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::me::me;

pub fn routes() -> Router {
    Router::new().route("/me", get(me))
}
