/*
 * Responsibility
 * - handler 向け extractor の公開インターフェース (re-export)
 */
mod request_ctx;

pub use request_ctx::{Principal, RequestContext, RequestCtx};
