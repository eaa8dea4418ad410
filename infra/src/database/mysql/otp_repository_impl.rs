//! MySQL implementation of the OTP record repository.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE otps (
//!     id         CHAR(36)     NOT NULL PRIMARY KEY,
//!     email      VARCHAR(255) NOT NULL,
//!     code       CHAR(6)      NOT NULL,
//!     created_at TIMESTAMP(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
//!     expires_at TIMESTAMP(3) NOT NULL,
//!     consumed   BOOLEAN      NOT NULL DEFAULT FALSE,
//!     INDEX idx_otps_lookup (email, code, consumed)
//! );
//! ```
//!
//! `created_at` is assigned by the database (authoritative for audit);
//! expiry comparisons use the stored `expires_at` computed at issue time.
//! Rows are retained after consumption or expiry; there is no cleanup task.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use mv_core::domain::entities::otp_record::OtpRecord;
use mv_core::errors::DomainError;
use mv_core::repositories::otp::OtpRepository;
use mv_core::services::otp::mask_email;

/// MySQL-backed OTP record repository
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlOtpRepository {
    /// Create a new OTP repository
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<OtpRecord, DomainError> {
        let id: String = row.try_get("id").map_err(Self::column_error)?;
        let id = Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
            message: format!("corrupt otp record id: {}", e),
        })?;

        Ok(OtpRecord {
            id,
            email: row.try_get("email").map_err(Self::column_error)?,
            code: row.try_get("code").map_err(Self::column_error)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(Self::column_error)?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(Self::column_error)?,
            consumed: row.try_get("consumed").map_err(Self::column_error)?,
        })
    }

    fn column_error(e: sqlx::Error) -> DomainError {
        DomainError::Internal {
            message: format!("failed to read otp record column: {}", e),
        }
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let query = r#"
            INSERT INTO otps (id, email, code, expires_at, consumed)
            VALUES (?, ?, ?, ?, FALSE)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.email)
            .bind(&record.code)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(&record.email),
                    error = %e,
                    "Failed to store OTP record"
                );
                DomainError::Internal {
                    message: format!("failed to store OTP record: {}", e),
                }
            })?;

        debug!(
            email = %mask_email(&record.email),
            record_id = %record.id,
            "Stored OTP record"
        );

        Ok(record)
    }

    async fn find_unconsumed(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let query = r#"
            SELECT id, email, code, created_at, expires_at, consumed
            FROM otps
            WHERE email = ? AND code = ? AND consumed = FALSE
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to look up OTP record"
                );
                DomainError::Internal {
                    message: format!("failed to look up OTP record: {}", e),
                }
            })?;

        match row {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => {
                debug!(email = %mask_email(email), "No unconsumed OTP record matches");
                Ok(None)
            }
        }
    }

    async fn consume(&self, id: Uuid) -> Result<bool, DomainError> {
        // The WHERE clause makes the flip atomic per row: only one caller
        // observes rows_affected = 1
        let query = "UPDATE otps SET consumed = TRUE WHERE id = ? AND consumed = FALSE";

        let result = sqlx::query(query)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(record_id = %id, error = %e, "Failed to consume OTP record");
                DomainError::Internal {
                    message: format!("failed to consume OTP record: {}", e),
                }
            })?;

        Ok(result.rows_affected() == 1)
    }
}
