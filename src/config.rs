/*
 * Responsibility
 * - 環境変数の読み込み (CORS 許可、署名シークレット、401 メッセージなど)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

const DEFAULT_DEV_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const DEFAULT_ALLOWED_HEADERS: &str = "Content-Type, Authorization";
const DEFAULT_MISSING_TOKEN_MESSAGE: &str = "missing token";
const DEFAULT_INVALID_TOKEN_MESSAGE: &str = "invalid token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Signing secret. Never printed.
#[derive(Clone)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // CORS (single origin, credentials allowed)
    pub cors_allowed_origin: String,
    pub cors_allowed_methods: String,
    pub cors_allowed_headers: String,

    // HS256 shared secret for access tokens
    pub jwt_secret: Secret,
    pub access_token_leeway_seconds: u64,

    // 401 body messages (two classes only)
    pub missing_token_message: String,
    pub invalid_token_message: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (process env in production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        // Production has no fallback origin: allowing a dev origin with credentials would be wrong.
        let cors_allowed_origin = match non_empty(lookup("CORS_ALLOWED_ORIGIN")) {
            Some(origin) => origin,
            None if app_env.is_production() => {
                return Err(ConfigError::Missing("CORS_ALLOWED_ORIGIN"));
            }
            None => DEFAULT_DEV_ORIGIN.to_string(),
        };

        if cors_allowed_origin == "*" {
            // Browsers refuse `*` together with Allow-Credentials: true
            return Err(ConfigError::Invalid("CORS_ALLOWED_ORIGIN"));
        }

        let cors_allowed_methods = non_empty(lookup("CORS_ALLOWED_METHODS"))
            .unwrap_or_else(|| DEFAULT_ALLOWED_METHODS.to_string());

        let cors_allowed_headers = non_empty(lookup("CORS_ALLOWED_HEADERS"))
            .unwrap_or_else(|| DEFAULT_ALLOWED_HEADERS.to_string());

        let jwt_secret = lookup("AUTH_JWT_SECRET")
            .ok_or(ConfigError::Missing("AUTH_JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("AUTH_JWT_SECRET"));
        }

        let access_token_leeway_seconds = match lookup("ACCESS_TOKEN_LEEWAY_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("ACCESS_TOKEN_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let missing_token_message = non_empty(lookup("AUTH_MISSING_TOKEN_MESSAGE"))
            .unwrap_or_else(|| DEFAULT_MISSING_TOKEN_MESSAGE.to_string());

        let invalid_token_message = non_empty(lookup("AUTH_INVALID_TOKEN_MESSAGE"))
            .unwrap_or_else(|| DEFAULT_INVALID_TOKEN_MESSAGE.to_string());

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origin,
            cors_allowed_methods,
            cors_allowed_headers,
            jwt_secret: Secret(jwt_secret),
            access_token_leeway_seconds,
            missing_token_message,
            invalid_token_message,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
