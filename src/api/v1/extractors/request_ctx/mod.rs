/*!
 * Request context extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（RequestContext）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - Principal
 * - RequestContext
 * - RequestCtx
 */

mod core;
mod types;

pub use self::core::RequestCtx;
pub use types::{Principal, RequestContext};
