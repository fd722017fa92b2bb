//! DTOs for the redirect creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a new redirect.
///
/// `url` is optional at the serde level so a missing field is reported as a
/// validation failure (400) rather than a deserialization failure (422).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRedirectRequest {
    #[validate(required(message = "URL is required"))]
    #[validate(length(min = 1, message = "URL is required"))]
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,
}

/// Newly registered redirect.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRedirectResponse {
    /// The generated token.
    pub subdomain: String,
    /// Public short URL for the token.
    pub url: String,
    #[serde(rename = "originalUrl")]
    pub original_url: String,
}
