//! Application factory
//!
//! This module provides the factory for creating the actix-web application
//! with all routes and middleware wired up.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::cors::create_cors;
use crate::routes::auth::{reset_password::reset_password, send_code::send_code, AppState};

use mv_core::repositories::OtpRepository;
use mv_core::services::otp::{IdentityProviderTrait, MailerTrait};

/// Create and configure the application with all dependencies
pub fn create_app<I, M, R>(
    app_state: web::Data<AppState<I, M, R>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    I: IdentityProviderTrait + 'static,
    M: MailerTrait + 'static,
    R: OtpRepository + 'static,
{
    let cors = create_cors();

    App::new()
        // Add application state
        .app_data(app_state)
        // Add middleware
        .wrap(Logger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/send-code", web::post().to(send_code::<I, M, R>))
                        .route(
                            "/reset-password",
                            web::post().to(reset_password::<I, M, R>),
                        ),
                )
                .route("/", web::get().to(api_documentation)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "myvoice-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "MyVoice974 API v1",
        "endpoints": {
            "health": "/health",
            "auth": {
                "send_code": {
                    "path": "/api/v1/auth/send-code",
                    "method": "POST",
                    "description": "Issue a password-reset code by email",
                    "request_body": {
                        "email": "string"
                    },
                    "responses": {
                        "200": "Code issued; dev: true when only logged server-side",
                        "400": "Missing or malformed email",
                        "404": "No account matches the email",
                        "500": "Internal error"
                    }
                },
                "reset_password": {
                    "path": "/api/v1/auth/reset-password",
                    "method": "POST",
                    "description": "Verify a code and set a new password",
                    "request_body": {
                        "email": "string",
                        "otp": "string (exactly 6 digits)",
                        "newPassword": "string (at least 6 chars)"
                    },
                    "responses": {
                        "200": "Password replaced",
                        "400": "Missing fields, wrong or expired code",
                        "404": "No account matches the email",
                        "500": "Internal error"
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
