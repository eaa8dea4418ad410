//! Types for OTP service results

use crate::domain::entities::otp_record::OtpRecord;

/// How the code left the service during issuance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpDelivery {
    /// Delivered through a configured mail gateway
    Sent {
        /// Provider message id
        message_id: String,
    },
    /// No gateway configured; the code was written to the server log
    Logged,
    /// A configured gateway failed; issuance still succeeded and the
    /// failure was swallowed
    Failed {
        /// Gateway error description
        reason: String,
    },
}

impl OtpDelivery {
    /// True for the server-log fallback, which the HTTP layer reports as
    /// `dev: true`
    pub fn is_dev_fallback(&self) -> bool {
        matches!(self, OtpDelivery::Logged)
    }
}

/// Result of issuing a passcode
#[derive(Debug, Clone)]
pub struct IssueOtpResult {
    /// The persisted record, including the plaintext code
    pub record: OtpRecord,
    /// How the code was (or was not) delivered
    pub delivery: OtpDelivery,
}
