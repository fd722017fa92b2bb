//! Helpers for URL validation, redirect target construction and host parsing.
//!
//! - [`target_url`] - Validation of submitted target URLs
//! - [`forwarding`] - Merging inbound path/query/headers into a redirect target
//! - [`extract_host`] - Token and base-domain extraction from the `Host` header

pub mod extract_host;
pub mod forwarding;
pub mod target_url;
