//! Error response body shared by all endpoints.

use serde::{Deserialize, Serialize};

/// Failure payload: a single human-readable message under the `error` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
}

impl ErrorBody {
    /// Create a new error body
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
