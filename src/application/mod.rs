//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::token_service::TokenService`] - Token derivation, collision retry and registration
//! - [`services::redirect_service::RedirectService`] - Token resolution and redirect target construction

pub mod services;
