//! Outbound mail (SMTP) configuration module
//!
//! Delivery credentials are optional: a deployment without `EMAIL_USER` /
//! `EMAIL_PASS` runs with the logging mail fallback so that local and
//! development flows keep working without a configured mailbox.

use serde::{Deserialize, Serialize};
use std::env;

/// SMTP relay configuration for OTP delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// Mailbox username (also the default sender address)
    pub username: String,

    /// Mailbox password or app password
    pub password: String,

    /// Optional explicit From header, e.g. `MyVoice974 <no-reply@myvoice974.re>`
    #[serde(default)]
    pub from_address: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("smtp.gmail.com"),
            username: String::new(),
            password: String::new(),
            from_address: None,
        }
    }
}

impl MailConfig {
    /// Load the mail configuration from `SMTP_HOST` / `EMAIL_USER` /
    /// `EMAIL_PASS` / `EMAIL_FROM`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            smtp_host: env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            username: env::var("EMAIL_USER").unwrap_or_default(),
            password: env::var("EMAIL_PASS").unwrap_or_default(),
            from_address: env::var("EMAIL_FROM").ok().filter(|v| !v.is_empty()),
        }
    }

    /// Whether real delivery is possible. Both credentials must be present;
    /// anything less activates the server-log fallback.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// The From header to use on outbound messages.
    pub fn sender(&self) -> String {
        match &self.from_address {
            Some(from) => from.clone(),
            None => format!("MyVoice974 <{}>", self.username),
        }
    }
}
