pub mod reset_password;
pub mod send_code;

use std::sync::Arc;

use mv_core::repositories::OtpRepository;
use mv_core::services::otp::{IdentityProviderTrait, MailerTrait, OtpService};

/// Application state that holds the shared OTP service
pub struct AppState<I, M, R>
where
    I: IdentityProviderTrait,
    M: MailerTrait,
    R: OtpRepository,
{
    pub otp_service: Arc<OtpService<I, M, R>>,
}
