//! Business logic services for the application layer.

pub mod redirect_service;
pub mod token_service;

pub use redirect_service::{RedirectOutcome, RedirectService};
pub use token_service::{DEFAULT_MAX_ATTEMPTS, TokenService};
