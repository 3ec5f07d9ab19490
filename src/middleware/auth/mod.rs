/*
 * Responsibility
 * - Bearer トークン認証ゲート (bearer)
 * - 拒否理由と 401 文言の対応 (rejection)
 */
pub mod bearer;
mod rejection;

pub use rejection::{AuthError, AuthMessages};
