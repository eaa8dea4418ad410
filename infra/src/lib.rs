//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the MyVoice974
//! backend. It provides the concrete collaborators behind the core trait
//! seams:
//!
//! - **Database**: MySQL implementations of the OTP repository and the
//!   identity provider, using SQLx
//! - **Mail**: SMTP delivery via lettre, with a logging fallback for
//!   deployments without mail credentials

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Mail gateway module - SMTP delivery and the logging fallback
pub mod mail;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Mail transport error
    #[error("Mail transport error: {0}")]
    Mail(String),
}
