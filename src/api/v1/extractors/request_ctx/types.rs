/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - auth gate が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 * - 1 リクエストにつき 1 つ。生成は auth gate の成功パスのみで、共有・再利用しない
 */

use serde::Serialize;

use crate::services::auth::{Claims, UserId};

/// 検証済みの呼び出し元
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// 認証済みのリクエストに付与されるコンテキスト
///
/// Fields are private: once the gate has built it, nothing downstream can swap the principal.
#[derive(Debug, Clone)]
pub struct RequestContext {
    principal: Principal,
}

impl RequestContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn into_principal(self) -> Principal {
        self.principal
    }
}
