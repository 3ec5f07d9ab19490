/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 (AppState) → Router 組み立て
 * - Middleware pipeline の適用 (CORS → Bearer の順)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ConfigError};
use crate::middleware::auth::AuthMessages;
use crate::middleware::cors::CorsPolicy;
use crate::services::auth::build_token_verifier;
use crate::{api, middleware::pipeline, state::AppState};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,request_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        tracing::error!(?info, "panic");

        // Development: fail fast. Production: default behavior, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        origin = %config.cors_allowed_origin,
        "starting request gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(&state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Process-level services, built once and shared read-only by every request.
pub(crate) fn build_state(config: &Config) -> Result<AppState, ConfigError> {
    let verifier = build_token_verifier(config);
    let cors = CorsPolicy::from_config(config)?;
    let auth_messages = AuthMessages::from_config(config);

    Ok(AppState::new(verifier, cors, auth_messages))
}

fn build_router(state: &AppState) -> Router {
    let routes = Router::new().nest("/api/v1", api::v1::routes());

    pipeline::apply(routes, state)
}
