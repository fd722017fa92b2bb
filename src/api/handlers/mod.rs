//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod create;
pub mod health;
pub mod redirect;

pub use create::create_handler;
pub use health::health_handler;
pub use redirect::{
    path_redirect_handler, path_redirect_with_rest_handler, path_root_handler,
    subdomain_redirect_handler, subdomain_redirect_with_rest_handler,
};
