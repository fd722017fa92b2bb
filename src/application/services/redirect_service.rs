//! Token resolution and redirect target construction.

use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{debug, error, warn};
use url::Url;

use crate::domain::repositories::RedirectRepository;
use crate::domain::token::is_valid_token;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::forwarding::{ForwardingPolicy, RequestContext, build_redirect_target};

/// Result of resolving an inbound token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Redirect { target: Url, status: StatusCode },
    NotFound,
    /// Storage failed or the stored target could not be parsed.
    InternalError,
}

/// Service that resolves tokens to outbound redirect targets.
///
/// Lookups go through a read-through cache; misses are served from the
/// repository and written back to the cache in the background. Storage
/// failures are never retried here.
///
/// Cached entries are never invalidated: they live until their TTL expires.
/// A record removed or reissued behind the service's back keeps resolving to
/// its cached target until then, which is why the server runs in-memory
/// storage without a cache.
pub struct RedirectService<R: RedirectRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    policy: ForwardingPolicy,
}

impl<R: RedirectRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>, policy: ForwardingPolicy) -> Self {
        Self {
            repository,
            cache,
            policy,
        }
    }

    pub fn policy(&self) -> ForwardingPolicy {
        self.policy
    }

    /// Resolves `token` and builds the redirect target for the inbound request.
    ///
    /// # Outcomes
    ///
    /// - [`RedirectOutcome::NotFound`] for an empty token, a token that cannot
    ///   have been issued, or an unknown token
    /// - [`RedirectOutcome::Redirect`] with status `302 Found` otherwise
    /// - [`RedirectOutcome::InternalError`] if storage fails
    pub async fn resolve(&self, token: &str, ctx: &RequestContext) -> RedirectOutcome {
        if token.is_empty() || !is_valid_token(token) {
            debug!(token, "Rejecting malformed token");
            return RedirectOutcome::NotFound;
        }

        let target_url = match self.lookup(token).await {
            Ok(Some(url)) => url,
            Ok(None) => return RedirectOutcome::NotFound,
            Err(e) => {
                error!(token, "Redirect lookup failed: {}", e);
                return RedirectOutcome::InternalError;
            }
        };

        match build_redirect_target(&target_url, ctx, &self.policy) {
            Ok(target) => RedirectOutcome::Redirect {
                target,
                status: StatusCode::FOUND,
            },
            Err(e) => {
                error!(token, %target_url, "Stored target is not a valid URL: {}", e);
                RedirectOutcome::InternalError
            }
        }
    }

    /// Returns the stored target URL for `token`, consulting the cache first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the repository lookup fails.
    pub async fn lookup(&self, token: &str) -> Result<Option<String>, AppError> {
        match self.cache.get_url(token).await {
            Ok(Some(url)) => {
                debug!(token, "Cache HIT");
                return Ok(Some(url));
            }
            Ok(None) => debug!(token, "Cache MISS"),
            Err(e) => warn!(token, "Cache error, falling back to storage: {}", e),
        }

        let Some(record) = self.repository.get(token).await? else {
            return Ok(None);
        };

        let cache = self.cache.clone();
        let cached_token = record.token.clone();
        let cached_url = record.target_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_url(&cached_token, &cached_url, None).await {
                warn!("Failed to cache redirect: {}", e);
            }
        });

        Ok(Some(record.target_url))
    }
}
