//! In-memory implementation of OtpRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// Mock OTP repository backed by a HashMap
pub struct MockOtpRepository {
    records: Arc<Mutex<HashMap<Uuid, OtpRecord>>>,
    should_fail: bool,
}

impl MockOtpRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            should_fail: false,
        }
    }

    /// Create a mock repository whose every call errors, for testing the
    /// internal-error paths
    pub fn failing() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            should_fail: true,
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a record by id, consumed or not
    pub fn get(&self, id: Uuid) -> Option<OtpRecord> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    /// Rewrite a record's expiry, to drive expiration tests without sleeping
    pub fn set_expires_at(&self, id: Uuid, expires_at: DateTime<Utc>) {
        if let Some(record) = self.records.lock().unwrap().get_mut(&id) {
            record.expires_at = expires_at;
        }
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn insert(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "otp store unavailable".to_string(),
            });
        }

        self.records
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_unconsumed(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OtpRecord>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "otp store unavailable".to_string(),
            });
        }

        let records = self.records.lock().unwrap();
        Ok(records
            .values()
            .filter(|r| r.email == email && r.code == code && !r.consumed)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn consume(&self, id: Uuid) -> Result<bool, DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal {
                message: "otp store unavailable".to_string(),
            });
        }

        let mut records = self.records.lock().unwrap();
        match records.get_mut(&id) {
            Some(record) if !record.consumed => {
                record.mark_consumed();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = MockOtpRepository::new();
        let record = OtpRecord::new("user@example.com".to_string());
        let code = record.code.clone();

        repo.insert(record.clone()).await.unwrap();

        let found = repo
            .find_unconsumed("user@example.com", &code)
            .await
            .unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn test_find_returns_newest_match() {
        let repo = MockOtpRepository::new();

        let mut older = OtpRecord::new("user@example.com".to_string());
        older.code = "123456".to_string();
        let mut newer = OtpRecord::new("user@example.com".to_string());
        newer.code = "123456".to_string();
        newer.created_at = older.created_at + chrono::Duration::seconds(1);

        repo.insert(older).await.unwrap();
        repo.insert(newer.clone()).await.unwrap();

        let found = repo
            .find_unconsumed("user@example.com", "123456")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, newer.id);
    }

    #[tokio::test]
    async fn test_consume_is_conditional() {
        let repo = MockOtpRepository::new();
        let record = OtpRecord::new("user@example.com".to_string());
        let id = record.id;

        repo.insert(record).await.unwrap();

        assert!(repo.consume(id).await.unwrap());
        assert!(!repo.consume(id).await.unwrap());
        assert!(repo.get(id).unwrap().consumed);
    }

    #[tokio::test]
    async fn test_consume_unknown_record() {
        let repo = MockOtpRepository::new();
        assert!(!repo.consume(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_consumed_records_no_longer_match() {
        let repo = MockOtpRepository::new();
        let record = OtpRecord::new("user@example.com".to_string());
        let code = record.code.clone();
        let id = record.id;

        repo.insert(record).await.unwrap();
        repo.consume(id).await.unwrap();

        let found = repo
            .find_unconsumed("user@example.com", &code)
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
