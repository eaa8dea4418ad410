//! Account entity as surfaced by the identity provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account resolved from an email address. The credential itself
/// never transits the domain; it lives and rotates inside the identity
/// provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier of the account
    pub id: Uuid,

    /// Email address owning the account
    pub email: String,
}

impl Account {
    /// Create a new account reference
    pub fn new(id: Uuid, email: String) -> Self {
        Self { id, email }
    }
}
