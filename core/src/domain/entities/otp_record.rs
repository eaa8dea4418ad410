//! One-time passcode entity for email-based password reset.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for passcodes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// Lifecycle state of a passcode record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpStatus {
    /// Unconsumed and within its expiry window
    Active,
    /// Unconsumed but past its expiry window; dead state
    Expired,
    /// Successfully used once; permanently inert
    Consumed,
}

/// One-time passcode bound to an email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Email address the code was issued for, case-sensitive as submitted
    pub email: String,

    /// The 6-digit passcode
    pub code: String,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used; monotonic false -> true
    pub consumed: bool,
}

impl OtpRecord {
    /// Creates a new passcode record with a random 6-digit code and the
    /// default 5-minute expiry.
    pub fn new(email: String) -> Self {
        Self::new_with_expiration(email, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new passcode record with a custom expiration time.
    pub fn new_with_expiration(email: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            email,
            code: Self::generate_code(),
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            consumed: false,
        }
    }

    /// Generates a uniformly random 6-digit code.
    ///
    /// The value space is [100000, 999999]: the floor keeps the first digit
    /// non-zero so every code is a true 6-digit number. Widening to
    /// 000000-999999 would change the issued-code contract.
    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(100_000..1_000_000);
        code.to_string()
    }

    /// Checks if the passcode has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Current lifecycle state. Expiry is a predicate over the stored
    /// timestamp, not a stored transition.
    pub fn status(&self) -> OtpStatus {
        if self.consumed {
            OtpStatus::Consumed
        } else if self.is_expired() {
            OtpStatus::Expired
        } else {
            OtpStatus::Active
        }
    }

    /// Marks the passcode as consumed.
    pub fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    /// Gets the time remaining until expiration, or zero if expired.
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
