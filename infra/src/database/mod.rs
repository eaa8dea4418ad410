//! Database module - connection pooling and MySQL repository
//! implementations.

pub mod mysql;

pub use mysql::{MySqlIdentityProvider, MySqlOtpRepository};

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;

use mv_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Create a MySQL connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to MySQL"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .connect(&config.url)
        .await?;

    Ok(pool)
}
