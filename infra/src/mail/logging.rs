//! Logging Mail Gateway Implementation
//!
//! Fallback used when no SMTP credentials are configured: the passcode is
//! written to the server log instead of being delivered, which keeps
//! local and development flows usable without a mailbox. Issuance reports
//! `dev: true` to the caller when this gateway is active.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use mv_core::services::otp::{mask_email, MailerTrait};

/// Mail gateway that writes passcodes to the server log
#[derive(Clone)]
pub struct LogMailer {
    /// Counter for tracking number of messages logged
    message_count: Arc<AtomicU64>,
    /// Whether to print messages to the console
    console_output: bool,
}

impl LogMailer {
    /// Create a new logging mailer
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            console_output: true,
        }
    }

    /// Create a logging mailer with console output disabled (for tests)
    pub fn quiet() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            console_output: false,
        }
    }

    /// Get the total number of messages logged
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailerTrait for LogMailer {
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        let message_id = format!("log_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("LOGGING MAIL GATEWAY - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", email);
            println!("Code: {}", code);
            println!("Expires in: {} minutes", expires_in_minutes);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_gateway",
            provider = "logging",
            email = %mask_email(email),
            code = %code,
            message_id = %message_id,
            "Passcode written to server log instead of being delivered"
        );

        Ok(message_id)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_returns_message_id() {
        let mailer = LogMailer::quiet();
        let result = mailer
            .send_otp_email("user@example.com", "123456", 5)
            .await;

        let message_id = result.unwrap();
        assert!(message_id.starts_with("log_"));
        assert_eq!(mailer.message_count(), 1);
    }

    #[tokio::test]
    async fn test_log_mailer_is_not_configured() {
        let mailer = LogMailer::quiet();
        assert!(!mailer.is_configured());
    }

    #[tokio::test]
    async fn test_log_mailer_counter() {
        let mailer = LogMailer::quiet();

        for i in 1..=3 {
            mailer
                .send_otp_email("user@example.com", "123456", 5)
                .await
                .unwrap();
            assert_eq!(mailer.message_count(), i);
        }
    }
}
