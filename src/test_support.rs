//! Shared fixtures for unit tests: token minting and a ready-made `AppState`.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use serde_json::{Value, json};

use crate::app::build_state;
use crate::config::Config;
use crate::state::AppState;

pub const TEST_SECRET: &str = "s3cr3t";
pub const TEST_ORIGIN: &str = "https://app.example.com";

/// HS256-signs arbitrary claims.
pub fn sign(secret: &str, claims: &impl Serialize) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn fresh_claims(user_id: Value, username: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({ "userId": user_id, "username": username, "iat": now, "exp": now + 600 })
}

pub fn expired_claims(user_id: Value, username: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({ "userId": user_id, "username": username, "iat": now - 7200, "exp": now - 3600 })
}

pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut pairs: Vec<(String, String)> = vec![
        ("AUTH_JWT_SECRET".into(), TEST_SECRET.into()),
        ("CORS_ALLOWED_ORIGIN".into(), TEST_ORIGIN.into()),
    ];
    pairs.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

    Config::from_lookup(|key| {
        pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}

pub fn test_state() -> AppState {
    build_state(&test_config(&[])).unwrap()
}
