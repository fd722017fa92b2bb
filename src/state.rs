//! Shared application state injected into all handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{RedirectService, TokenService};
use crate::config::RedirectMode;
use crate::domain::repositories::RedirectRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::forwarding::ForwardingPolicy;

/// Application state shared across all request handlers.
///
/// Cloned cheaply for each request; every heavy member is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService<dyn RedirectRepository>>,
    pub redirect_service: Arc<RedirectService<dyn RedirectRepository>>,
    pub repository: Arc<dyn RedirectRepository>,
    pub cache: Arc<dyn CacheService>,

    pub mode: RedirectMode,
    /// Public base domain for short URLs; derived from `Host` when `None`.
    pub base_domain: Option<String>,
    pub public_scheme: String,
    /// Upper bound on a single creation request.
    pub create_timeout: Duration,
}

impl AppState {
    /// Wires services around a repository and cache.
    pub fn new(
        repository: Arc<dyn RedirectRepository>,
        cache: Arc<dyn CacheService>,
        settings: StateSettings,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(
            repository.clone(),
            settings.token_max_attempts,
        ));
        let redirect_service = Arc::new(RedirectService::new(
            repository.clone(),
            cache.clone(),
            settings.forwarding,
        ));

        Self {
            token_service,
            redirect_service,
            repository,
            cache,
            mode: settings.mode,
            base_domain: settings.base_domain,
            public_scheme: settings.public_scheme,
            create_timeout: settings.create_timeout,
        }
    }
}

/// Tunables used to build an [`AppState`].
#[derive(Debug, Clone)]
pub struct StateSettings {
    pub mode: RedirectMode,
    pub base_domain: Option<String>,
    pub public_scheme: String,
    pub forwarding: ForwardingPolicy,
    pub token_max_attempts: usize,
    pub create_timeout: Duration,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            mode: RedirectMode::Path,
            base_domain: None,
            public_scheme: "https".to_string(),
            forwarding: ForwardingPolicy::default(),
            token_max_attempts: crate::application::services::DEFAULT_MAX_ATTEMPTS,
            create_timeout: Duration::from_secs(10),
        }
    }
}

impl From<&crate::config::Config> for StateSettings {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            mode: config.redirect_mode,
            base_domain: config.base_domain.clone(),
            public_scheme: config.public_scheme.clone(),
            forwarding: config.forwarding,
            token_max_attempts: config.token_max_attempts,
            create_timeout: Duration::from_secs(config.create_timeout_seconds),
        }
    }
}
