use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;
use std::io;
use std::sync::Arc;

use mv_api::app::create_app;
use mv_api::routes::auth::AppState;
use mv_core::services::otp::{OtpService, OtpServiceConfig};
use mv_infra::database::{create_pool, MySqlIdentityProvider, MySqlOtpRepository};
use mv_infra::mail::create_mailer;
use mv_shared::config::{DatabaseConfig, MailConfig, ServerConfig};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting MyVoice974 API server");

    // Load configuration
    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env();
    let mail_config = MailConfig::from_env();

    // Connect to MySQL
    let pool = create_pool(&database_config)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    // Wire the service graph
    let identity_provider = Arc::new(MySqlIdentityProvider::new(pool.clone()));
    let otp_repository = Arc::new(MySqlOtpRepository::new(pool));
    let mailer = Arc::new(create_mailer(&mail_config));

    let otp_service = Arc::new(OtpService::new(
        identity_provider,
        mailer,
        otp_repository,
        OtpServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState { otp_service });

    let bind_address = server_config.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if server_config.workers > 0 {
        server = server.workers(server_config.workers);
    }

    server.bind(&bind_address)?.run().await
}
