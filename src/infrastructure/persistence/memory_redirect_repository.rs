//! In-memory implementation of the redirect repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::domain::entities::RedirectRecord;
use crate::domain::repositories::RedirectRepository;
use crate::error::AppError;

/// Process-local repository backed by a sharded concurrent map.
///
/// The conditional insert goes through `DashMap::entry`, which holds the shard
/// lock for the key, so concurrent inserts of the same token cannot both win.
/// Data is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryRedirectRepository {
    storage: DashMap<String, RedirectRecord>,
}

impl InMemoryRedirectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl RedirectRepository for InMemoryRedirectRepository {
    async fn exists(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.storage.contains_key(token))
    }

    async fn insert_if_absent(&self, token: &str, target_url: &str) -> Result<bool, AppError> {
        match self.storage.entry(token.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(RedirectRecord::new(
                    token.to_string(),
                    target_url.to_string(),
                    Utc::now().timestamp(),
                ));
                Ok(true)
            }
        }
    }

    async fn get(&self, token: &str) -> Result<Option<RedirectRecord>, AppError> {
        Ok(self.storage.get(token).map(|entry| entry.value().clone()))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.storage.len() as i64)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
