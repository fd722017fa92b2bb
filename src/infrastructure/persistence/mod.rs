//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgRedirectRepository`] - PostgreSQL storage using `INSERT ... ON CONFLICT DO NOTHING`
//! - [`InMemoryRedirectRepository`] - `DashMap`-backed storage for development and tests

pub mod memory_redirect_repository;
pub mod pg_redirect_repository;

pub use memory_redirect_repository::InMemoryRedirectRepository;
pub use pg_redirect_repository::PgRedirectRepository;
