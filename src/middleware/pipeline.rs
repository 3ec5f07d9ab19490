//! Request pipeline: the fixed, explicit ordering of every gate in front of the handlers.
//!
//! Outer → inner:
//! 1. access tracing
//! 2. CORS gate (answers `OPTIONS` itself)
//! 3. auth gate (bearer token → `RequestContext`)
//! 4. body limit + handler timeout
//! 5. downstream handler
//!
//! axum applies `.layer()` calls inside-out, so the code below lists them innermost first.

use axum::{Router, middleware::from_fn_with_state};

use crate::middleware::{auth::bearer::auth_gate, cors, http};
use crate::state::AppState;

pub fn apply(router: Router, state: &AppState) -> Router {
    let router = http::apply_limits(router);
    let router = router.layer(from_fn_with_state(state.clone(), auth_gate));
    let router = cors::apply(router, &state.cors);

    http::apply_tracing(router)
}
