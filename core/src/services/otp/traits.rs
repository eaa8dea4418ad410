//! Traits for identity-provider and mail-gateway integration

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::account::Account;

/// Errors surfaced by an identity provider
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider rejected the address as malformed
    #[error("invalid email address")]
    InvalidEmail,

    /// The provider could not be reached or failed internally
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Trait for identity provider integration (account lookup and credential
/// rotation)
#[async_trait]
pub trait IdentityProviderTrait: Send + Sync {
    /// Resolve an email address to an account, if one exists
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, IdentityError>;

    /// Replace the password of the given account
    async fn update_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), IdentityError>;
}

/// Trait for mail gateway integration
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Deliver a passcode to the given address. Returns a provider message
    /// id on success. Logging implementations write the code to the server
    /// log instead of delivering it.
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String>;

    /// Whether this gateway performs real delivery. `false` marks the
    /// server-log fallback, surfaced to callers as a dev-mode response.
    fn is_configured(&self) -> bool;
}
