//! Main OTP service implementation

use std::sync::Arc;
use tracing;

use crate::domain::entities::otp_record::{OtpRecord, CODE_LENGTH};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::otp::OtpRepository;

use super::config::OtpServiceConfig;
use super::traits::{IdentityError, IdentityProviderTrait, MailerTrait};
use super::types::{IssueOtpResult, OtpDelivery};

/// OTP service for issuing passcodes and resetting passwords
pub struct OtpService<I: IdentityProviderTrait, M: MailerTrait, R: OtpRepository> {
    /// Identity provider for account lookup and credential rotation
    identity_provider: Arc<I>,
    /// Mail gateway for code delivery
    mailer: Arc<M>,
    /// Document store holding the passcode records
    otp_repository: Arc<R>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<I: IdentityProviderTrait, M: MailerTrait, R: OtpRepository> OtpService<I, M, R> {
    /// Create a new OTP service
    pub fn new(
        identity_provider: Arc<I>,
        mailer: Arc<M>,
        otp_repository: Arc<R>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            identity_provider,
            mailer,
            otp_repository,
            config,
        }
    }

    /// Issue a fresh passcode for the given email address.
    ///
    /// This method:
    /// 1. Confirms an account exists for the email
    /// 2. Mints a random 6-digit code with a 5-minute expiry
    /// 3. Persists the record (durable on return)
    /// 4. Hands the code to the mail gateway
    ///
    /// Each call mints a new, independent code; prior outstanding codes stay
    /// valid until they expire or are consumed. A gateway failure does not
    /// fail issuance: the record is already persisted, and the caller only
    /// learns whether the deployment runs on the server-log fallback.
    pub async fn issue_otp(&self, email: &str) -> DomainResult<IssueOtpResult> {
        if email.trim().is_empty() {
            return Err(DomainError::MissingField {
                field: "email".to_string(),
            });
        }

        let account = self.resolve_account(email).await?;

        let record = OtpRecord::new_with_expiration(
            email.to_string(),
            self.config.code_expiration_minutes,
        );

        tracing::info!(
            email = %mask_email(email),
            account_id = %account.id,
            record_id = %record.id,
            event = "otp_generated",
            "Generated new passcode for account"
        );

        let record = self
            .otp_repository
            .insert(record)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to persist passcode record"
                );
                e
            })?;

        let delivery = match self
            .mailer
            .send_otp_email(email, &record.code, self.config.code_expiration_minutes)
            .await
        {
            Ok(message_id) if self.mailer.is_configured() => {
                tracing::info!(
                    email = %mask_email(email),
                    message_id = %message_id,
                    event = "otp_email_sent",
                    "Passcode email handed to mail gateway"
                );
                OtpDelivery::Sent { message_id }
            }
            Ok(_) => {
                tracing::info!(
                    email = %mask_email(email),
                    record_id = %record.id,
                    event = "otp_logged",
                    "Mail gateway not configured, passcode written to server log"
                );
                OtpDelivery::Logged
            }
            Err(reason) => {
                // Swallowed: the record is persisted, issuance reports success
                tracing::warn!(
                    email = %mask_email(email),
                    error = %reason,
                    event = "otp_email_failed",
                    "Mail gateway failed to deliver passcode"
                );
                OtpDelivery::Failed { reason }
            }
        };

        Ok(IssueOtpResult { record, delivery })
    }

    /// Verify a submitted (email, code) pair and rotate the account password.
    ///
    /// The lookup matches the newest unconsumed record for the pair. An
    /// expired match fails without mutating the record. On a valid match the
    /// password is rotated first and the record consumed second, with a
    /// conditional write: losing the consumption race reports
    /// `InvalidOrExpiredCode` even though this caller may have rotated the
    /// password.
    pub async fn verify_otp_and_reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        for (value, field) in [(email, "email"), (code, "otp"), (new_password, "newPassword")] {
            if value.trim().is_empty() {
                return Err(DomainError::MissingField {
                    field: field.to_string(),
                });
            }
        }

        // A code that is not 6 ASCII digits cannot match any record
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            tracing::warn!(
                email = %mask_email(email),
                code_length = code.len(),
                event = "otp_invalid_format",
                "Submitted code has an invalid format"
            );
            return Err(DomainError::InvalidOrExpiredCode);
        }

        let record = self
            .otp_repository
            .find_unconsumed(email, code)
            .await?
            .ok_or_else(|| {
                tracing::warn!(
                    email = %mask_email(email),
                    event = "otp_no_match",
                    "No unconsumed passcode matches the submitted pair"
                );
                DomainError::InvalidOrExpiredCode
            })?;

        if record.is_expired() {
            // The record stays as-is; expiry is not a stored transition
            tracing::warn!(
                email = %mask_email(email),
                record_id = %record.id,
                expires_at = %record.expires_at,
                event = "otp_expired",
                "Matching passcode is past its expiry"
            );
            return Err(DomainError::CodeExpired);
        }

        let account = self.resolve_account(email).await?;

        self.identity_provider
            .update_password(account.id, new_password)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    account_id = %account.id,
                    error = %e,
                    event = "password_update_failed",
                    "Identity provider failed to rotate the password"
                );
                DomainError::Internal {
                    message: format!("failed to update password: {}", e),
                }
            })?;

        match self.otp_repository.consume(record.id).await {
            Ok(true) => {
                tracing::info!(
                    email = %mask_email(email),
                    account_id = %account.id,
                    record_id = %record.id,
                    event = "otp_consumed",
                    "Password rotated and passcode consumed"
                );
                Ok(())
            }
            Ok(false) => {
                // Lost the consumption race to a concurrent verify
                tracing::warn!(
                    email = %mask_email(email),
                    record_id = %record.id,
                    event = "otp_consume_conflict",
                    "Passcode was consumed concurrently after the password was rotated"
                );
                Err(DomainError::InvalidOrExpiredCode)
            }
            Err(e) => {
                // The password is already rotated; the record stays active.
                // This inconsistency window is logged, not compensated.
                tracing::error!(
                    email = %mask_email(email),
                    record_id = %record.id,
                    error = %e,
                    event = "otp_consume_failed",
                    "Failed to mark passcode consumed after rotating the password"
                );
                Err(e)
            }
        }
    }

    /// Resolve an email to an account, mapping identity-provider failures
    /// into the domain taxonomy.
    async fn resolve_account(
        &self,
        email: &str,
    ) -> DomainResult<crate::domain::entities::account::Account> {
        match self.identity_provider.find_account_by_email(email).await {
            Ok(Some(account)) => Ok(account),
            Ok(None) => {
                tracing::warn!(
                    email = %mask_email(email),
                    event = "account_not_found",
                    "No account matches the email address"
                );
                Err(DomainError::AccountNotFound)
            }
            Err(IdentityError::InvalidEmail) => Err(DomainError::InvalidEmail),
            Err(IdentityError::Unavailable(message)) => {
                tracing::error!(
                    email = %mask_email(email),
                    error = %message,
                    event = "identity_provider_error",
                    "Identity provider call failed"
                );
                Err(DomainError::Internal {
                    message: format!("identity provider unavailable: {}", message),
                })
            }
        }
    }
}

/// Mask an email address for logging: keep the first character of the local
/// part and the domain.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
