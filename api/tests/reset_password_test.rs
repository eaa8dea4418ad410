use actix_web::{http::StatusCode, test, web, App};
use chrono::{Duration, Utc};
use std::sync::Arc;

use mv_api::dto::auth::{ResetPasswordResponse, SendCodeResponse};
use mv_api::routes::auth::{reset_password::reset_password, send_code::send_code, AppState};
use mv_core::domain::entities::otp_record::OtpRecord;
use mv_core::repositories::{MockOtpRepository, OtpRepository};
use mv_core::services::otp::mock::{MockIdentityProvider, MockMailer};
use mv_core::services::otp::{OtpService, OtpServiceConfig};
use mv_shared::types::response::ErrorBody;

type TestAppState = AppState<MockIdentityProvider, MockMailer, MockOtpRepository>;

fn create_test_app_state() -> (
    web::Data<TestAppState>,
    Arc<MockIdentityProvider>,
    Arc<MockMailer>,
    Arc<MockOtpRepository>,
) {
    let identity_provider = Arc::new(MockIdentityProvider::new());
    let mailer = Arc::new(MockMailer::new());
    let otp_repository = Arc::new(MockOtpRepository::new());

    let otp_service = Arc::new(OtpService::new(
        identity_provider.clone(),
        mailer.clone(),
        otp_repository.clone(),
        OtpServiceConfig::default(),
    ));

    (
        web::Data::new(AppState { otp_service }),
        identity_provider,
        mailer,
        otp_repository,
    )
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .route(
                    "/api/v1/auth/send-code",
                    web::post().to(send_code::<
                        MockIdentityProvider,
                        MockMailer,
                        MockOtpRepository,
                    >),
                )
                .route(
                    "/api/v1/auth/reset-password",
                    web::post().to(reset_password::<
                        MockIdentityProvider,
                        MockMailer,
                        MockOtpRepository,
                    >),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn test_reset_password_end_to_end() {
    let (state, identity, mailer, _) = create_test_app_state();
    identity.add_account("a@b.com");

    let app = test_app!(state);

    // Issue a code
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(serde_json::json!({"email": "a@b.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: SendCodeResponse = test::read_body_json(resp).await;
    assert!(body.success);

    let code = mailer.last_code_for("a@b.com").expect("code delivered");

    // Reset with the delivered code
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(serde_json::json!({
            "email": "a@b.com",
            "otp": code,
            "newPassword": "newpass1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ResetPasswordResponse = test::read_body_json(resp).await;
    assert!(body.success);
    assert_eq!(identity.password_of("a@b.com"), Some("newpass1".to_string()));

    // Replaying the same code fails
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(serde_json::json!({
            "email": "a@b.com",
            "otp": code,
            "newPassword": "otherpass"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Invalid or expired OTP");
    assert_eq!(identity.password_of("a@b.com"), Some("newpass1".to_string()));
}

#[actix_web::test]
async fn test_reset_password_missing_fields() {
    let (state, _, _, _) = create_test_app_state();

    let app = test_app!(state);

    for payload in [
        serde_json::json!({}),
        serde_json::json!({"email": "a@b.com"}),
        serde_json::json!({"email": "a@b.com", "otp": "123456"}),
        serde_json::json!({"email": "a@b.com", "otp": "", "newPassword": "newpass1"}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/reset-password")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.error, "Missing required fields");
    }
}

#[actix_web::test]
async fn test_reset_password_wrong_code() {
    let (state, identity, mailer, _) = create_test_app_state();
    identity.add_account("a@b.com");

    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(serde_json::json!({"email": "a@b.com"}))
        .to_request();
    test::call_service(&app, req).await;

    let issued = mailer.last_code_for("a@b.com").unwrap();
    let wrong = if issued == "111111" { "222222" } else { "111111" };

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(serde_json::json!({
            "email": "a@b.com",
            "otp": wrong,
            "newPassword": "newpass1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Invalid or expired OTP");
    assert_eq!(
        identity.password_of("a@b.com"),
        Some("initial-password".to_string())
    );
}

#[actix_web::test]
async fn test_reset_password_expired_code() {
    let (state, identity, _, repository) = create_test_app_state();
    identity.add_account("a@b.com");

    // Plant a record that is already past its expiry
    let mut record = OtpRecord::new("a@b.com".to_string());
    record.expires_at = Utc::now() - Duration::seconds(1);
    let code = record.code.clone();
    repository.insert(record).await.unwrap();

    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(serde_json::json!({
            "email": "a@b.com",
            "otp": code,
            "newPassword": "newpass1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "OTP has expired");
}

#[actix_web::test]
async fn test_reset_password_short_password() {
    let (state, identity, _, _) = create_test_app_state();
    identity.add_account("a@b.com");

    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(serde_json::json!({
            "email": "a@b.com",
            "otp": "123456",
            "newPassword": "abc"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(
        body.error,
        "Le mot de passe doit contenir au moins 6 caractères."
    );
}

#[actix_web::test]
async fn test_reset_password_unknown_account_with_planted_record() {
    let (state, _, _, repository) = create_test_app_state();

    // A matching record exists but no account does: the defensive
    // account-not-found path
    let record = OtpRecord::new("ghost@example.com".to_string());
    let code = record.code.clone();
    repository.insert(record).await.unwrap();

    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/reset-password")
        .set_json(serde_json::json!({
            "email": "ghost@example.com",
            "otp": code,
            "newPassword": "newpass1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Aucun compte trouvé avec cette adresse email.");
}
