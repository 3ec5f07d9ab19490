/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenVerifier;

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    let verifier = TokenVerifier::new(
        config.jwt_secret.expose().as_bytes(),
        config.access_token_leeway_seconds,
    );

    Arc::new(verifier)
}
