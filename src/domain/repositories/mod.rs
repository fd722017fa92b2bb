//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern.
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`RedirectRepository`] - Token → target URL storage with conditional insert
//!
//! # Testing
//!
//! See integration tests in `tests/repository_redirect.rs` for usage examples.

pub mod redirect_repository;

pub use redirect_repository::RedirectRepository;

#[cfg(test)]
pub use redirect_repository::MockRedirectRepository;
