//! Rejection taxonomy of the auth gate.
//!
//! Five internal reasons, two client-visible message classes. Which check failed is logged,
//! never sent.

use thiserror::Error;

use crate::config::Config;
use crate::services::auth::VerificationFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authorization header is missing")]
    MissingAuthorizationHeader,
    #[error("authorization header is not a bearer credential")]
    MalformedAuthorizationHeader,
    #[error("token signature is invalid")]
    TokenSignatureInvalid,
    #[error("token is malformed")]
    TokenMalformed,
    #[error("token has expired")]
    TokenExpired,
}

impl From<VerificationFailure> for AuthError {
    fn from(e: VerificationFailure) -> Self {
        match e {
            VerificationFailure::SignatureInvalid => Self::TokenSignatureInvalid,
            VerificationFailure::Malformed => Self::TokenMalformed,
            VerificationFailure::Expired => Self::TokenExpired,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionClass {
    MissingToken,
    InvalidToken,
}

impl AuthError {
    pub fn class(&self) -> RejectionClass {
        match self {
            Self::MissingAuthorizationHeader | Self::MalformedAuthorizationHeader => {
                RejectionClass::MissingToken
            }
            Self::TokenSignatureInvalid | Self::TokenMalformed | Self::TokenExpired => {
                RejectionClass::InvalidToken
            }
        }
    }
}

/// Client-facing 401 messages, one per class.
#[derive(Debug, Clone)]
pub struct AuthMessages {
    pub missing_token: String,
    pub invalid_token: String,
}

impl AuthMessages {
    pub fn from_config(config: &Config) -> Self {
        Self {
            missing_token: config.missing_token_message.clone(),
            invalid_token: config.invalid_token_message.clone(),
        }
    }

    pub fn message_for(&self, class: RejectionClass) -> &str {
        match class {
            RejectionClass::MissingToken => &self.missing_token,
            RejectionClass::InvalidToken => &self.invalid_token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_problems_share_one_class() {
        assert_eq!(
            AuthError::MissingAuthorizationHeader.class(),
            RejectionClass::MissingToken
        );
        assert_eq!(
            AuthError::MalformedAuthorizationHeader.class(),
            RejectionClass::MissingToken
        );
    }

    #[test]
    fn token_problems_share_the_other_class() {
        for failure in [
            VerificationFailure::SignatureInvalid,
            VerificationFailure::Malformed,
            VerificationFailure::Expired,
        ] {
            assert_eq!(AuthError::from(failure).class(), RejectionClass::InvalidToken);
        }
    }

    #[test]
    fn messages_resolve_per_class() {
        let messages = AuthMessages {
            missing_token: "トークンがありません".to_string(),
            invalid_token: "トークンが無効です".to_string(),
        };

        assert_eq!(
            messages.message_for(RejectionClass::MissingToken),
            "トークンがありません"
        );
        assert_eq!(
            messages.message_for(RejectionClass::InvalidToken),
            "トークンが無効です"
        );
    }
}
