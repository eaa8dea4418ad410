use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::{ResetPasswordRequest, ResetPasswordResponse};
use crate::handlers::error::{domain_error_response, first_validation_message};

use mv_core::repositories::OtpRepository;
use mv_core::services::otp::{mask_email, IdentityProviderTrait, MailerTrait};
use mv_shared::types::response::ErrorBody;
use mv_shared::utils::validation::not_empty;

use super::AppState;

/// Handler for POST /api/v1/auth/reset-password
///
/// Verifies a submitted (email, otp) pair against the outstanding passcode
/// records and, if valid, replaces the account's password.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "otp": "123456",
///     "newPassword": "newpass1"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true }
/// ```
///
/// ## Errors
/// - 400 Bad Request: missing fields, wrong or expired code, short password
/// - 404 Not Found: no account matches the email (defensive)
/// - 500 Internal Server Error: store or identity-provider failure
pub async fn reset_password<I, M, R>(
    state: web::Data<AppState<I, M, R>>,
    request: web::Json<ResetPasswordRequest>,
) -> HttpResponse
where
    I: IdentityProviderTrait + 'static,
    M: MailerTrait + 'static,
    R: OtpRepository + 'static,
{
    let (email, otp, new_password) = match (
        request.email.as_deref(),
        request.otp.as_deref(),
        request.new_password.as_deref(),
    ) {
        (Some(email), Some(otp), Some(new_password))
            if not_empty(email) && not_empty(otp) && not_empty(new_password) =>
        {
            (email.trim().to_string(), otp.to_string(), new_password.to_string())
        }
        _ => {
            log::warn!("reset_password request with missing fields");
            return HttpResponse::BadRequest().json(ErrorBody::new("Missing required fields"));
        }
    };

    if let Err(errors) = request.validate() {
        log::warn!(
            "reset_password validation failed for {}: {:?}",
            mask_email(&email),
            errors
        );
        let message = first_validation_message(&errors)
            .unwrap_or_else(|| "Invalid or expired OTP".to_string());
        return HttpResponse::BadRequest().json(ErrorBody::new(message));
    }

    match state
        .otp_service
        .verify_otp_and_reset_password(&email, &otp, &new_password)
        .await
    {
        Ok(()) => {
            log::info!("Password reset completed for {}", mask_email(&email));
            HttpResponse::Ok().json(ResetPasswordResponse { success: true })
        }
        Err(error) => {
            log::warn!(
                "Password reset failed for {}: {:?}",
                mask_email(&email),
                error
            );
            domain_error_response(&error)
        }
    }
}
