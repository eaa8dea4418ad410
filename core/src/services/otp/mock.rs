//! Mock identity-provider and mailer implementations, shared by the core
//! unit tests and the API integration tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::account::Account;

use super::traits::{IdentityError, IdentityProviderTrait, MailerTrait};

struct MockAccount {
    id: Uuid,
    password: String,
}

/// Mock identity provider backed by a HashMap keyed by email
pub struct MockIdentityProvider {
    accounts: Arc<Mutex<HashMap<String, MockAccount>>>,
    should_fail: bool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// A provider whose every call reports itself unavailable
    pub fn failing() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            should_fail: true,
        }
    }

    /// Register an account and return its id
    pub fn add_account(&self, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            MockAccount {
                id,
                password: "initial-password".to_string(),
            },
        );
        id
    }

    /// Current password of an account, for asserting rotation
    pub fn password_of(&self, email: &str) -> Option<String> {
        self.accounts
            .lock()
            .unwrap()
            .get(email)
            .map(|a| a.password.clone())
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProviderTrait for MockIdentityProvider {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, IdentityError> {
        if self.should_fail {
            return Err(IdentityError::Unavailable(
                "identity provider error".to_string(),
            ));
        }
        if !email.contains('@') {
            return Err(IdentityError::InvalidEmail);
        }

        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .get(email)
            .map(|a| Account::new(a.id, email.to_string())))
    }

    async fn update_password(
        &self,
        account_id: Uuid,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        if self.should_fail {
            return Err(IdentityError::Unavailable(
                "identity provider error".to_string(),
            ));
        }

        let mut accounts = self.accounts.lock().unwrap();
        match accounts.values_mut().find(|a| a.id == account_id) {
            Some(account) => {
                account.password = new_password.to_string();
                Ok(())
            }
            None => Err(IdentityError::Unavailable(format!(
                "no account with id {}",
                account_id
            ))),
        }
    }
}

/// Mock mailer that records every (email, code) it is asked to deliver
pub struct MockMailer {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    configured: bool,
    should_fail: bool,
}

impl MockMailer {
    /// A configured gateway that always delivers
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            configured: true,
            should_fail: false,
        }
    }

    /// The server-log fallback: unconfigured, never fails
    pub fn unconfigured() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            configured: false,
            should_fail: false,
        }
    }

    /// A configured gateway whose sends fail
    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            configured: true,
            should_fail: true,
        }
    }

    /// Number of messages handed to the gateway
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// The most recent code handed over for an address
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send_otp_email(
        &self,
        email: &str,
        code: &str,
        _expires_in_minutes: i64,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("simulated mail failure".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(format!("mock_{}", Uuid::new_v4()))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
