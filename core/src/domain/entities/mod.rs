//! Domain entities.

pub mod account;
pub mod otp_record;

pub use account::Account;
pub use otp_record::{OtpRecord, OtpStatus, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES};
