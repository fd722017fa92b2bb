#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;
use subdomain_redirect::config::RedirectMode;
use subdomain_redirect::domain::entities::RedirectRecord;
use subdomain_redirect::domain::repositories::RedirectRepository;
use subdomain_redirect::error::AppError;
use subdomain_redirect::infrastructure::cache::NullCache;
use subdomain_redirect::infrastructure::persistence::InMemoryRedirectRepository;
use subdomain_redirect::routes::build_router;
use subdomain_redirect::state::{AppState, StateSettings};
use subdomain_redirect::utils::forwarding::ForwardingPolicy;

pub const BASE_DOMAIN: &str = "short.test";

pub fn settings(mode: RedirectMode) -> StateSettings {
    StateSettings {
        mode,
        base_domain: Some(BASE_DOMAIN.to_string()),
        ..StateSettings::default()
    }
}

pub fn create_test_state(
    settings: StateSettings,
) -> (AppState, Arc<InMemoryRedirectRepository>) {
    let repo = Arc::new(InMemoryRedirectRepository::new());
    let state = AppState::new(repo.clone(), Arc::new(NullCache::new()), settings);
    (state, repo)
}

pub fn create_test_server(settings: StateSettings) -> (TestServer, Arc<InMemoryRedirectRepository>) {
    let (state, repo) = create_test_state(settings);
    let server = TestServer::new(build_router(state)).unwrap();
    (server, repo)
}

pub fn path_server() -> (TestServer, Arc<InMemoryRedirectRepository>) {
    create_test_server(settings(RedirectMode::Path))
}

pub fn subdomain_server() -> (TestServer, Arc<InMemoryRedirectRepository>) {
    create_test_server(settings(RedirectMode::Subdomain))
}

pub fn header_forwarding_server(mode: RedirectMode) -> (TestServer, Arc<InMemoryRedirectRepository>) {
    create_test_server(StateSettings {
        forwarding: ForwardingPolicy {
            headers: true,
            ..ForwardingPolicy::default()
        },
        ..settings(mode)
    })
}

/// Builds a server around an arbitrary repository.
pub fn create_server_with_repository(
    repo: Arc<dyn RedirectRepository>,
    settings: StateSettings,
) -> TestServer {
    let state = AppState::new(repo, Arc::new(NullCache::new()), settings);
    TestServer::new(build_router(state)).unwrap()
}

/// How [`StubRepository`] answers every call.
#[derive(Clone, Copy)]
pub enum StubBehavior {
    /// Every token is taken.
    Occupied,
    /// Every call fails with a storage error that names a credential.
    Failing,
    /// Every call stalls for this long before reporting an empty store.
    Slow(Duration),
}

pub const STORAGE_SECRET: &str = "password authentication failed for user admin";

pub struct StubRepository {
    behavior: StubBehavior,
}

impl StubRepository {
    pub fn new(behavior: StubBehavior) -> Arc<Self> {
        Arc::new(Self { behavior })
    }

    async fn answer<T>(&self, value: T) -> Result<T, AppError> {
        match self.behavior {
            StubBehavior::Occupied => Ok(value),
            StubBehavior::Failing => Err(AppError::storage(STORAGE_SECRET)),
            StubBehavior::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Ok(value)
            }
        }
    }
}

#[async_trait]
impl RedirectRepository for StubRepository {
    async fn exists(&self, _token: &str) -> Result<bool, AppError> {
        let taken = matches!(self.behavior, StubBehavior::Occupied);
        self.answer(taken).await
    }

    async fn insert_if_absent(&self, _token: &str, _target_url: &str) -> Result<bool, AppError> {
        let inserted = !matches!(self.behavior, StubBehavior::Occupied);
        self.answer(inserted).await
    }

    async fn get(&self, token: &str) -> Result<Option<RedirectRecord>, AppError> {
        let record = matches!(self.behavior, StubBehavior::Occupied)
            .then(|| RedirectRecord::new(token.to_string(), "https://example.com".to_string(), 0));
        self.answer(record).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.answer(0).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.answer(()).await
    }
}
