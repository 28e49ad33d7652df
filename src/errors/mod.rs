//! Error types for token lifecycle operations.

use thiserror::Error;

/// Errors surfaced by the token lifecycle manager and its collaborators.
///
/// Only [`TokenError::BackendUnavailable`] is retryable; every other variant
/// means the token itself is invalid or policy forbids the operation.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token has been blacklisted")]
    TokenBlacklisted,

    #[error("Invalid claims: {claims:?}")]
    InvalidClaim { claims: Vec<String> },

    #[error("Blacklist is disabled")]
    BlacklistDisabled,

    #[error("Blacklist key claim missing: {claim}")]
    Configuration { claim: String },

    #[error("Backend unavailable: {message}")]
    BackendUnavailable { message: String },

    #[error("Token encoding failed")]
    Encoding,
}

impl TokenError {
    /// Whether the caller may retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TokenError::BackendUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, TokenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_claim_lists_every_violation() {
        let error = TokenError::InvalidClaim {
            claims: vec!["nbf".to_string(), "exp".to_string()],
        };
        let message = error.to_string();
        assert!(message.contains("nbf"));
        assert!(message.contains("exp"));
    }

    #[test]
    fn test_only_backend_failures_are_retryable() {
        let backend = TokenError::BackendUnavailable {
            message: "connection refused".to_string(),
        };
        assert!(backend.is_retryable());
        assert!(!TokenError::TokenExpired.is_retryable());
        assert!(!TokenError::TokenBlacklisted.is_retryable());
        assert!(!TokenError::BlacklistDisabled.is_retryable());
    }
}
