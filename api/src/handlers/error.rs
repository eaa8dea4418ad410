//! Mapping from domain errors to HTTP responses.
//!
//! The wire strings follow the product's locale: issuance errors are
//! French, verification errors are the fixed English strings the clients
//! already match on.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use mv_core::errors::DomainError;
use mv_shared::types::response::ErrorBody;

/// Convert a domain error into its HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    log::error!("Domain error ({}): {}", error.code(), error);

    match error {
        DomainError::MissingField { .. } => {
            HttpResponse::BadRequest().json(ErrorBody::new("Missing required fields"))
        }
        DomainError::InvalidEmail => {
            HttpResponse::BadRequest().json(ErrorBody::new("Adresse email invalide."))
        }
        DomainError::AccountNotFound => HttpResponse::NotFound().json(ErrorBody::new(
            "Aucun compte trouvé avec cette adresse email.",
        )),
        DomainError::InvalidOrExpiredCode => {
            HttpResponse::BadRequest().json(ErrorBody::new("Invalid or expired OTP"))
        }
        DomainError::CodeExpired => {
            HttpResponse::BadRequest().json(ErrorBody::new("OTP has expired"))
        }
        DomainError::Internal { message } => {
            HttpResponse::InternalServerError().json(ErrorBody::new(message.clone()))
        }
    }
}

/// First human-readable message out of a validator error set
pub fn first_validation_message(errors: &ValidationErrors) -> Option<String> {
    errors
        .field_errors()
        .values()
        .flat_map(|field_errors| field_errors.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (DomainError::AccountNotFound, StatusCode::NOT_FOUND),
            (DomainError::InvalidEmail, StatusCode::BAD_REQUEST),
            (DomainError::InvalidOrExpiredCode, StatusCode::BAD_REQUEST),
            (DomainError::CodeExpired, StatusCode::BAD_REQUEST),
            (
                DomainError::MissingField {
                    field: "email".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Internal {
                    message: "boom".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(domain_error_response(&error).status(), expected);
        }
    }
}
