use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::error::{domain_error_response, first_validation_message};

use mv_core::repositories::OtpRepository;
use mv_core::services::otp::{mask_email, IdentityProviderTrait, MailerTrait};
use mv_shared::types::response::ErrorBody;

use super::AppState;

/// Handler for POST /api/v1/auth/send-code
///
/// Issues a one-time passcode for the given email address and delivers it
/// by email (or writes it to the server log when no mail gateway is
/// configured).
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true }
/// ```
/// `{ "success": true, "dev": true }` when the code was only logged.
///
/// ## Errors
/// - 400 Bad Request: missing or malformed email
/// - 404 Not Found: no account matches the email
/// - 500 Internal Server Error: store or identity-provider failure
pub async fn send_code<I, M, R>(
    state: web::Data<AppState<I, M, R>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    I: IdentityProviderTrait + 'static,
    M: MailerTrait + 'static,
    R: OtpRepository + 'static,
{
    let email = match request.email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => email.to_string(),
        _ => {
            log::warn!("send_code request without an email");
            return HttpResponse::BadRequest().json(ErrorBody::new("Email is required"));
        }
    };

    if let Err(errors) = request.validate() {
        log::warn!(
            "send_code validation failed for {}: {:?}",
            mask_email(&email),
            errors
        );
        let message = first_validation_message(&errors)
            .unwrap_or_else(|| "Adresse email invalide.".to_string());
        return HttpResponse::BadRequest().json(ErrorBody::new(message));
    }

    log::info!("Issuing passcode for {}", mask_email(&email));

    match state.otp_service.issue_otp(&email).await {
        Ok(result) => {
            let dev = result.delivery.is_dev_fallback().then_some(true);
            HttpResponse::Ok().json(SendCodeResponse { success: true, dev })
        }
        Err(error) => {
            log::error!(
                "Failed to issue passcode for {}: {:?}",
                mask_email(&email),
                error
            );
            domain_error_response(&error)
        }
    }
}
