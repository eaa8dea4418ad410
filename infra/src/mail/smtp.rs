//! SMTP mail gateway implementation using lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;
use uuid::Uuid;

use mv_core::services::otp::{mask_email, MailerTrait};
use mv_shared::config::MailConfig;

use crate::InfrastructureError;

/// Mail gateway delivering passcodes through an SMTP relay
pub struct SmtpMailer {
    /// Async SMTP transport
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// From header for outbound messages
    sender: String,
}

impl SmtpMailer {
    /// Create a new SMTP mailer from configuration
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Mail(e.to_string()))?
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender: config.sender(),
        })
    }

    fn compose(&self, email: &str, code: &str, expires_in_minutes: i64) -> Result<Message, String> {
        Message::builder()
            .from(
                self.sender
                    .parse()
                    .map_err(|e| format!("invalid sender address: {}", e))?,
            )
            .to(email
                .parse()
                .map_err(|e| format!("invalid recipient address: {}", e))?)
            .subject("Réinitialisation de votre mot de passe MyVoice974")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Bonjour,\n\n\
                 Votre code de vérification MyVoice974 est : {code}\n\n\
                 Ce code expire dans {expires_in_minutes} minutes.\n\n\
                 Si vous n'êtes pas à l'origine de cette demande, ignorez cet email.\n\n\
                 L'équipe MyVoice974"
            ))
            .map_err(|e| format!("failed to build message: {}", e))
    }
}

#[async_trait]
impl MailerTrait for SmtpMailer {
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        expires_in_minutes: i64,
    ) -> Result<String, String> {
        let message = self.compose(email, code, expires_in_minutes)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| format!("smtp send failed: {}", e))?;

        let message_id = format!("smtp_{}", Uuid::new_v4());

        info!(
            target: "mail_gateway",
            provider = "smtp",
            email = %mask_email(email),
            message_id = %message_id,
            "Passcode email sent"
        );

        Ok(message_id)
    }

    fn is_configured(&self) -> bool {
        true
    }
}
