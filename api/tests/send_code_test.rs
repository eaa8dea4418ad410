use actix_web::{http::StatusCode, test, web};
use std::sync::Arc;

use mv_api::app::create_app;
use mv_api::dto::auth::SendCodeResponse;
use mv_api::routes::auth::AppState;
use mv_core::repositories::MockOtpRepository;
use mv_core::services::otp::mock::{MockIdentityProvider, MockMailer};
use mv_core::services::otp::{OtpService, OtpServiceConfig};
use mv_shared::types::response::ErrorBody;

type TestAppState = AppState<MockIdentityProvider, MockMailer, MockOtpRepository>;

/// Helper to build test application state around a chosen mailer
fn create_test_app_state(
    mailer: MockMailer,
) -> (
    web::Data<TestAppState>,
    Arc<MockIdentityProvider>,
    Arc<MockMailer>,
    Arc<MockOtpRepository>,
) {
    let identity_provider = Arc::new(MockIdentityProvider::new());
    let mailer = Arc::new(mailer);
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

#[actix_web::test]
async fn test_send_code_success() {
    let (state, identity, mailer, repository) = create_test_app_state(MockMailer::new());
    identity.add_account("user@example.com");

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(serde_json::json!({"email": "user@example.com"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: SendCodeResponse = test::read_body_json(resp).await;
    assert!(body.success);
    assert_eq!(body.dev, None);

    // One record persisted, one email handed to the gateway
    assert_eq!(repository.len(), 1);
    assert!(mailer.last_code_for("user@example.com").is_some());
}

#[actix_web::test]
async fn test_send_code_dev_fallback_without_mailer() {
    let (state, identity, _, _) = create_test_app_state(MockMailer::unconfigured());
    identity.add_account("user@example.com");

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(serde_json::json!({"email": "user@example.com"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: SendCodeResponse = test::read_body_json(resp).await;
    assert!(body.success);
    assert_eq!(body.dev, Some(true));
}

#[actix_web::test]
async fn test_send_code_mailer_failure_still_succeeds() {
    let (state, identity, _, repository) = create_test_app_state(MockMailer::failing());
    identity.add_account("user@example.com");

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(serde_json::json!({"email": "user@example.com"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: SendCodeResponse = test::read_body_json(resp).await;
    assert!(body.success);
    assert_eq!(body.dev, None);
    assert_eq!(repository.len(), 1);
}

#[actix_web::test]
async fn test_send_code_missing_email() {
    let (state, _, _, repository) = create_test_app_state(MockMailer::new());

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(serde_json::json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Email is required");
    assert!(repository.is_empty());
}

#[actix_web::test]
async fn test_send_code_malformed_email() {
    let (state, _, _, _) = create_test_app_state(MockMailer::new());

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(serde_json::json!({"email": "not-an-email"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Adresse email invalide.");
}

#[actix_web::test]
async fn test_send_code_unknown_account() {
    let (state, _, mailer, repository) = create_test_app_state(MockMailer::new());

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(serde_json::json!({"email": "nouser@example.com"}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.error, "Aucun compte trouvé avec cette adresse email.");

    // Nothing persisted, nothing handed to the gateway
    assert!(repository.is_empty());
    assert_eq!(mailer.sent_count(), 0);
}

#[actix_web::test]
async fn test_health_endpoint() {
    let (state, _, _, _) = create_test_app_state(MockMailer::new());

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "myvoice-api");
}

#[actix_web::test]
async fn test_unknown_route_returns_json_404() {
    let (state, _, _, _) = create_test_app_state(MockMailer::new());

    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "not_found");
}
