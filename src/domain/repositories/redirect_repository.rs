//! Repository trait for redirect record storage.

use crate::domain::entities::RedirectRecord;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage interface consumed by the token generator and the redirect resolver.
///
/// Implementations must make [`insert_if_absent`](Self::insert_if_absent)
/// atomic with respect to concurrent callers: it is the only uniqueness
/// guarantee. [`exists`](Self::exists) is advisory.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRedirectRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryRedirectRepository`] - Process-local map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Returns true if a record with this token exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on connectivity failure.
    async fn exists(&self, token: &str) -> Result<bool, AppError>;

    /// Inserts `(token, target_url)` only if the token is currently absent.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the record was inserted
    /// - `Ok(false)` if the token was already taken
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on connectivity failure.
    async fn insert_if_absent(&self, token: &str, target_url: &str) -> Result<bool, AppError>;

    /// Finds a record by its token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on connectivity failure.
    async fn get(&self, token: &str) -> Result<Option<RedirectRecord>, AppError>;

    /// Counts stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on connectivity failure.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store cannot be queried.
    async fn health_check(&self) -> Result<(), AppError>;
}
