//! OTP record repository trait defining the interface for passcode
//! persistence.
//!
//! Implementations sit on top of the document store (MySQL in production,
//! in-memory for tests) and must provide per-record atomicity for
//! `consume`: the conditional flip of the consumed flag is what enforces
//! at-most-once verification under concurrency.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

/// Repository trait for OTP record persistence operations
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a freshly issued record. Durable on return: the caller treats
    /// a successful insert as proof of persistence.
    ///
    /// Issuing never supersedes earlier records; any number of unconsumed
    /// records may coexist for one email.
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError>;

    /// Find the newest unconsumed record matching (email, code), expired or
    /// not. Expiry is the service's concern; the filter here is only
    /// `consumed = false`.
    async fn find_unconsumed(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// Conditionally mark a record consumed: the flag flips only if it was
    /// still false at write time.
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the flip
    /// * `Ok(false)` - The record was already consumed (or does not exist)
    /// * `Err(DomainError)` - Store error
    async fn consume(&self, id: Uuid) -> Result<bool, DomainError>;
}
