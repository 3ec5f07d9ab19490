/*
 * Responsibility
 * - Router / middleware に紐づける共有コンテキスト (AppState)
 *   - verifier: 署名シークレット入りの TokenVerifier
 *   - cors: 起動時にパース済みの CORS ヘッダ値
 *   - auth_messages: 401 本文の文言 (2 クラス)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - 読み取り専用。リクエスト単位の状態はここに置かない (RequestContext を使う)
 */
use std::sync::Arc;

use crate::middleware::auth::AuthMessages;
use crate::middleware::cors::CorsPolicy;
use crate::services::auth::TokenVerifier;

#[derive(Clone, Debug)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub cors: Arc<CorsPolicy>,
    pub auth_messages: Arc<AuthMessages>,
}

impl AppState {
    pub fn new(verifier: Arc<TokenVerifier>, cors: CorsPolicy, auth_messages: AuthMessages) -> Self {
        Self {
            verifier,
            cors: Arc::new(cors),
            auth_messages: Arc::new(auth_messages),
        }
    }
}
