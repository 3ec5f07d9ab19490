/*
 * Responsibility
 * - middleware の公開インターフェース
 * - cors / auth の各ゲートと、それを順番に組む pipeline
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod pipeline;
