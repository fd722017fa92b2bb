//! Domain layer containing business entities and storage contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits define the contracts implemented by
//! [`crate::infrastructure::persistence`].
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`token`] - Token shape rules and deterministic token derivation
//!
//! # Redirect Lifecycle
//!
//! 1. `POST /` reaches [`crate::application::services::TokenService`]
//! 2. A token is derived from the URL and registered with a conditional insert
//! 3. Lookups go through [`crate::application::services::RedirectService`]
//! 4. Records are never updated or deleted by the service

pub mod entities;
pub mod repositories;
pub mod token;
