//! Token generation and registration service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use crate::domain::repositories::RedirectRepository;
use crate::domain::token::{derive_token, is_reserved, random_salt};
use crate::error::AppError;
use crate::utils::target_url::validate_target_url;

/// Default bound on candidate tokens tried per registration.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Service that mints a unique token for a target URL and stores the mapping.
///
/// # Algorithm
///
/// 1. The first candidate is `derive_token(url, "")`
/// 2. The candidate is checked with `exists` and registered with `insert_if_absent`
/// 3. On a collision (taken token or lost insert race) a fresh random salt is
///    drawn and a new candidate is derived
/// 4. After `max_attempts` candidates the call fails with [`AppError::Exhausted`]
///
/// Only the conditional insert decides uniqueness; the existence check saves a
/// write when the candidate is obviously taken.
///
/// Submitting the same URL twice always creates a second record: the first
/// candidate collides with the earlier registration and a salted token is used.
pub struct TokenService<R: RedirectRepository + ?Sized> {
    repository: Arc<R>,
    max_attempts: usize,
}

impl<R: RedirectRepository + ?Sized> TokenService<R> {
    /// Creates a new token service. `max_attempts` is clamped to at least 1.
    pub fn new(repository: Arc<R>, max_attempts: usize) -> Self {
        Self {
            repository,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Registers `url` under a newly derived token and returns the token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or not an absolute
    /// HTTP(S) URL.
    ///
    /// Returns [`AppError::Exhausted`] if no free token was found within the
    /// attempt bound.
    ///
    /// Returns [`AppError::Storage`] if the repository is unreachable.
    pub async fn generate_and_register(&self, url: &str) -> Result<String, AppError> {
        let url = validate_target_url(url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "reason": format!("{:?}", e) }))
        })?;

        let mut candidate = derive_token(url, "");

        for attempt in 1..=self.max_attempts {
            if self.is_assignable(&candidate) && !self.repository.exists(&candidate).await? {
                if self.repository.insert_if_absent(&candidate, url).await? {
                    info!(token = %candidate, attempt, "Registered redirect");
                    return Ok(candidate);
                }
                debug!(token = %candidate, attempt, "Lost insert race");
            } else {
                debug!(token = %candidate, attempt, "Token collision");
            }

            if attempt < self.max_attempts {
                let salt = random_salt()?;
                candidate = derive_token(url, &salt);
            }
        }

        Err(AppError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    fn is_assignable(&self, candidate: &str) -> bool {
        !candidate.is_empty() && !is_reserved(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockRedirectRepository;
    use crate::domain::token::is_valid_token;
    use crate::infrastructure::persistence::InMemoryRedirectRepository;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const URL: &str = "https://example.com/page";

    #[tokio::test]
    async fn test_first_candidate_is_unsalted_hash() {
        let mut mock_repo = MockRedirectRepository::new();

        mock_repo
            .expect_exists()
            .withf(|token| token == "nkhf8idmvhen")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_insert_if_absent()
            .withf(|token, url| token == "nkhf8idmvhen" && url == URL)
            .times(1)
            .returning(|_, _| Ok(true));

        let service = TokenService::new(Arc::new(mock_repo), DEFAULT_MAX_ATTEMPTS);

        let token = service.generate_and_register(URL).await.unwrap();
        assert_eq!(token, "nkhf8idmvhen");
    }

    #[tokio::test]
    async fn test_empty_url_rejected_without_storage_access() {
        let mut mock_repo = MockRedirectRepository::new();
        mock_repo.expect_exists().times(0);
        mock_repo.expect_insert_if_absent().times(0);

        let service = TokenService::new(Arc::new(mock_repo), DEFAULT_MAX_ATTEMPTS);

        let result = service.generate_and_register("").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_relative_url_rejected() {
        let mock_repo = MockRedirectRepository::new();
        let service = TokenService::new(Arc::new(mock_repo), DEFAULT_MAX_ATTEMPTS);

        let result = service.generate_and_register("not-a-url").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_collision_retries_with_salted_token() {
        let mut mock_repo = MockRedirectRepository::new();

        mock_repo
            .expect_exists()
            .withf(|token| token == "nkhf8idmvhen")
            .times(1)
            .returning(|_| Ok(true));

        mock_repo
            .expect_exists()
            .withf(|token| token != "nkhf8idmvhen")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_insert_if_absent()
            .withf(|token, _| token != "nkhf8idmvhen")
            .times(1)
            .returning(|_, _| Ok(true));

        let service = TokenService::new(Arc::new(mock_repo), DEFAULT_MAX_ATTEMPTS);

        let token = service.generate_and_register(URL).await.unwrap();
        assert_ne!(token, "nkhf8idmvhen");
        assert!(is_valid_token(&token));
    }

    #[tokio::test]
    async fn test_lost_insert_race_is_not_fatal() {
        let mut mock_repo = MockRedirectRepository::new();
        let inserts = Arc::new(AtomicUsize::new(0));

        mock_repo.expect_exists().times(2).returning(|_| Ok(false));

        let counter = inserts.clone();
        mock_repo
            .expect_insert_if_absent()
            .times(2)
            .returning(move |_, _| Ok(counter.fetch_add(1, Ordering::SeqCst) > 0));

        let service = TokenService::new(Arc::new(mock_repo), DEFAULT_MAX_ATTEMPTS);

        let token = service.generate_and_register(URL).await.unwrap();
        assert_ne!(token, "nkhf8idmvhen");
        assert_eq!(inserts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_exhausted_after_max_attempts() {
        let mut mock_repo = MockRedirectRepository::new();

        mock_repo.expect_exists().times(10).returning(|_| Ok(true));
        mock_repo.expect_insert_if_absent().times(0);

        let service = TokenService::new(Arc::new(mock_repo), 10);

        let result = service.generate_and_register(URL).await;
        assert!(matches!(result, Err(AppError::Exhausted { attempts: 10 })));
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let mut mock_repo = MockRedirectRepository::new();

        mock_repo
            .expect_exists()
            .times(1)
            .returning(|_| Err(AppError::storage("connection refused")));
        mock_repo.expect_insert_if_absent().times(0);

        let service = TokenService::new(Arc::new(mock_repo), DEFAULT_MAX_ATTEMPTS);

        let result = service.generate_and_register(URL).await;
        assert!(matches!(result, Err(AppError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_zero_attempts_clamped_to_one() {
        let mut mock_repo = MockRedirectRepository::new();
        mock_repo.expect_exists().times(1).returning(|_| Ok(false));
        mock_repo
            .expect_insert_if_absent()
            .times(1)
            .returning(|_, _| Ok(true));

        let service = TokenService::new(Arc::new(mock_repo), 0);
        assert_eq!(service.max_attempts(), 1);
        assert!(service.generate_and_register(URL).await.is_ok());
    }

    #[tokio::test]
    async fn test_forced_collision_with_real_store() {
        let repo = Arc::new(InMemoryRedirectRepository::new());
        repo.insert_if_absent(&derive_token(URL, ""), "https://squatter.example")
            .await
            .unwrap();

        let service = TokenService::new(repo.clone(), DEFAULT_MAX_ATTEMPTS);

        let token = service.generate_and_register(URL).await.unwrap();
        assert_ne!(token, derive_token(URL, ""));

        let record = repo.get(&token).await.unwrap().unwrap();
        assert_eq!(record.target_url, URL);

        let squatter = repo.get(&derive_token(URL, "")).await.unwrap().unwrap();
        assert_eq!(squatter.target_url, "https://squatter.example");
    }

    #[tokio::test]
    async fn test_same_url_registered_repeatedly_gets_distinct_tokens() {
        let repo = Arc::new(InMemoryRedirectRepository::new());
        let service = TokenService::new(repo.clone(), DEFAULT_MAX_ATTEMPTS);

        let mut tokens = HashSet::new();
        for _ in 0..20 {
            tokens.insert(service.generate_and_register(URL).await.unwrap());
        }

        assert_eq!(tokens.len(), 20);
        assert_eq!(repo.len(), 20);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_of_same_url() {
        const K: usize = 16;

        let repo = Arc::new(InMemoryRedirectRepository::new());
        let service = Arc::new(TokenService::new(repo.clone(), DEFAULT_MAX_ATTEMPTS));

        let handles: Vec<_> = (0..K)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.generate_and_register(URL).await })
            })
            .collect();

        let mut tokens = HashSet::new();
        for handle in handles {
            tokens.insert(handle.await.unwrap().unwrap());
        }

        assert_eq!(tokens.len(), K);
        assert_eq!(repo.len(), K);

        for token in &tokens {
            let record = repo.get(token).await.unwrap().unwrap();
            assert_eq!(record.target_url, URL);
        }
    }
}
