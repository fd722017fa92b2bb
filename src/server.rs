//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, cache setup, and the Axum server lifecycle.

use crate::config::{Config, StorageBackend};
use crate::domain::repositories::RedirectRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{InMemoryRedirectRepository, PgRedirectRepository};
use crate::routes::app_router;
use crate::state::{AppState, StateSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage (PostgreSQL pool with migrations, or in-memory)
/// - Redis cache (or NullCache fallback)
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (repository, pool) = connect_storage(&config).await?;
    let cache = connect_cache(&config).await;

    let state = AppState::new(repository, cache, StateSettings::from(&config));

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr} ({} mode)", config.redirect_mode);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
        info!("Database pool closed");
    }

    info!("Server stopped");
    Ok(())
}

/// Opens the configured storage backend.
///
/// The pool is returned separately so it can be closed on shutdown.
async fn connect_storage(
    config: &Config,
) -> Result<(Arc<dyn RedirectRepository>, Option<PgPool>)> {
    match config.storage_backend {
        StorageBackend::Memory => {
            warn!("Using in-memory storage; redirects are lost on restart");
            Ok((Arc::new(InMemoryRedirectRepository::new()), None))
        }
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres storage backend")?;

            let pool = connect_pool(config, database_url).await?;

            let repository = PgRedirectRepository::new(Arc::new(pool.clone()));
            Ok((Arc::new(repository), Some(pool)))
        }
    }
}

/// Creates the PostgreSQL pool and applies pending migrations.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok(pool)
}

async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = config.redis_url.as_deref().filter(|_| config.is_cache_enabled()) else {
        info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
