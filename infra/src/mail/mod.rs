//! Mail Gateway Module
//!
//! Delivery of passcode emails. Two implementations share the
//! `MailerTrait` seam:
//!
//! - **SMTP**: real delivery through a relay (lettre)
//! - **Logging**: writes the code to the server log for deployments
//!   without mail credentials
//!
//! The factory picks the implementation from the mail configuration, so
//! a fresh checkout works without an SMTP account.

pub mod logging;
pub mod smtp;

pub use logging::LogMailer;
pub use smtp::SmtpMailer;

use async_trait::async_trait;

use mv_core::services::otp::MailerTrait;
use mv_shared::config::MailConfig;

/// Mail gateway selected at startup
pub enum Mailer {
    /// Real SMTP delivery
    Smtp(SmtpMailer),
    /// Server-log fallback
    Logging(LogMailer),
}

#[async_trait]
impl MailerTrait for Mailer {
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        match self {
            Mailer::Smtp(mailer) => mailer.send_otp_email(email, code, expires_in_minutes).await,
            Mailer::Logging(mailer) => {
                mailer.send_otp_email(email, code, expires_in_minutes).await
            }
        }
    }

    fn is_configured(&self) -> bool {
        match self {
            Mailer::Smtp(mailer) => mailer.is_configured(),
            Mailer::Logging(mailer) => mailer.is_configured(),
        }
    }
}

/// Create a mail gateway based on configuration
///
/// Returns the SMTP implementation when credentials are present, the
/// logging fallback otherwise (or when the SMTP transport fails to build).
pub fn create_mailer(config: &MailConfig) -> Mailer {
    if !config.is_configured() {
        tracing::warn!(
            "SMTP credentials not configured, passcodes will be written to the server log"
        );
        return Mailer::Logging(LogMailer::new());
    }

    match SmtpMailer::new(config) {
        Ok(mailer) => Mailer::Smtp(mailer),
        Err(e) => {
            tracing::error!("Failed to initialize SMTP mailer: {}", e);
            tracing::warn!("Falling back to the logging mailer");
            Mailer::Logging(LogMailer::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_without_credentials() {
        let config = MailConfig::default();
        let mailer = create_mailer(&config);
        assert!(matches!(mailer, Mailer::Logging(_)));
        assert!(!mailer.is_configured());
    }

    #[tokio::test]
    async fn test_factory_with_credentials() {
        let mut config = MailConfig::default();
        config.username = "no-reply@myvoice974.re".to_string();
        config.password = "app-password".to_string();

        let mailer = create_mailer(&config);
        assert!(matches!(mailer, Mailer::Smtp(_)));
        assert!(mailer.is_configured());
    }
}
