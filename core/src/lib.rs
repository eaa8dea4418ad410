//! # MyVoice974 Core
//!
//! Core business logic and domain layer for the MyVoice974 backend.
//! This crate contains the OTP domain entity and its lifecycle, the
//! password-reset service, repository and collaborator interfaces, and the
//! domain error types that form the foundation of the application
//! architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Account, OtpRecord, OtpStatus};
pub use errors::{DomainError, DomainResult};
pub use repositories::{MockOtpRepository, OtpRepository};
pub use services::{
    IdentityError, IdentityProviderTrait, IssueOtpResult, MailerTrait, OtpDelivery, OtpService,
    OtpServiceConfig,
};
