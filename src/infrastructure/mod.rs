//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Read-through cache for redirect lookups (Redis and no-op)
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod cache;
pub mod persistence;
