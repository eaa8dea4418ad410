//! MySQL-backed identity provider.
//!
//! Stand-in for the managed authentication service: accounts live in an
//! `accounts` table and passwords are stored as bcrypt hashes.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE accounts (
//!     id            CHAR(36)     NOT NULL PRIMARY KEY,
//!     email         VARCHAR(255) NOT NULL UNIQUE,
//!     password_hash VARCHAR(255) NOT NULL,
//!     created_at    TIMESTAMP(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3)
//! );
//! ```

use async_trait::async_trait;
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use mv_core::domain::entities::account::Account;
use mv_core::services::otp::{mask_email, IdentityError, IdentityProviderTrait};
use mv_shared::utils::validation::is_valid_email;

/// MySQL-backed identity provider
pub struct MySqlIdentityProvider {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlIdentityProvider {
    /// Create a new identity provider
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProviderTrait for MySqlIdentityProvider {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, IdentityError> {
        if !is_valid_email(email) {
            return Err(IdentityError::InvalidEmail);
        }

        let row = sqlx::query("SELECT id, email FROM accounts WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    email = %mask_email(email),
                    error = %e,
                    "Failed to look up account"
                );
                IdentityError::Unavailable(e.to_string())
            })?;

        match row {
            Some(row) => {
                let id: String = row
                    .try_get("id")
                    .map_err(|e| IdentityError::Unavailable(e.to_string()))?;
                let id = Uuid::parse_str(&id)
                    .map_err(|e| IdentityError::Unavailable(format!("corrupt account id: {}", e)))?;
                let email: String = row
                    .try_get("email")
                    .map_err(|e| IdentityError::Unavailable(e.to_string()))?;

                Ok(Some(Account::new(id, email)))
            }
            None => {
                debug!(email = %mask_email(email), "No account matches");
                Ok(None)
            }
        }
    }

    async fn update_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let password_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| IdentityError::Unavailable(format!("password hashing failed: {}", e)))?;

        let result = sqlx::query("UPDATE accounts SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(account_id = %account_id, error = %e, "Failed to update password");
                IdentityError::Unavailable(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::Unavailable(format!(
                "no account with id {}",
                account_id
            )));
        }

        debug!(account_id = %account_id, "Password updated");
        Ok(())
    }
}
