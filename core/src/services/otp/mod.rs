//! OTP service module for email-based password reset
//!
//! This module provides the one-time passcode workflow:
//! - Code issuance bound to an existing account
//! - Email delivery with a server-log fallback for unconfigured deployments
//! - Verification against the persisted record with at-most-once consumption
//! - Password rotation through the identity provider

mod config;
mod service;
mod traits;
mod types;

pub mod mock;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::{mask_email, OtpService};
pub use traits::{IdentityError, IdentityProviderTrait, MailerTrait};
pub use types::{IssueOtpResult, OtpDelivery};
