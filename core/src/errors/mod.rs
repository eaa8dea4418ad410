//! Domain-specific error types and error handling.
//!
//! Messages here are internal English descriptions; the user-facing
//! (French) strings are configured in the presentation layer.

use thiserror::Error;

/// Core domain errors for the OTP password-reset flow
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("required field missing: {field}")]
    MissingField { field: String },

    #[error("invalid email address")]
    InvalidEmail,

    #[error("no account matches the email address")]
    AccountNotFound,

    #[error("invalid or expired code")]
    InvalidOrExpiredCode,

    #[error("code has expired")]
    CodeExpired,

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable tag used for structured logging and branching.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::MissingField { .. } => "missing_field",
            DomainError::InvalidEmail => "invalid_email",
            DomainError::AccountNotFound => "account_not_found",
            DomainError::InvalidOrExpiredCode => "invalid_or_expired_code",
            DomainError::CodeExpired => "code_expired",
            DomainError::Internal { .. } => "internal_error",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = DomainError::MissingField {
            field: "email".to_string(),
        };
        assert!(error.to_string().contains("email"));
        assert_eq!(error.code(), "missing_field");
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            DomainError::MissingField { field: "email".into() },
            DomainError::InvalidEmail,
            DomainError::AccountNotFound,
            DomainError::InvalidOrExpiredCode,
            DomainError::CodeExpired,
            DomainError::Internal { message: "boom".into() },
        ];

        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }
}
