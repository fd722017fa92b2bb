//! Token shape rules and deterministic token derivation.
//!
//! A token is 1-12 characters of `[a-z0-9]`, derived from the target URL and an
//! optional salt. Derivation is reproducible: the same `(url, salt)` pair always
//! yields the same token.

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Maximum number of characters in a token.
pub const MAX_TOKEN_LENGTH: usize = 12;

/// Number of random bytes in a collision salt (hex-encoded to twice as many chars).
const SALT_BYTES: usize = 2;

/// Tokens that would shadow fixed routes.
const RESERVED_TOKENS: &[&str] = &["health"];

/// Compiled regex for issued token shape.
static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]{1,12}$").expect("token regex is valid"));

/// Derives a candidate token from a URL and a salt.
///
/// SHA-256 is computed over the raw concatenation `url + salt` (no delimiter),
/// the digest is base64url-encoded, every non-alphanumeric character is dropped,
/// the rest is lowercased and truncated to [`MAX_TOKEN_LENGTH`] characters.
///
/// Truncation leaves a real birthday-bound risk at scale, so callers must
/// register candidates through a conditional insert and retry on collision.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(derive_token("https://example.com/page", ""), "nkhf8idmvhen");
/// assert_eq!(derive_token("https://example.com/pa", "ge"), "nkhf8idmvhen");
/// ```
pub fn derive_token(url: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hasher.finalize();

    base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(digest)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(MAX_TOKEN_LENGTH)
        .collect()
}

/// Generates a fresh random salt: two random bytes, hex-encoded.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn random_salt() -> Result<String, AppError> {
    let mut buffer = [0u8; SALT_BYTES];

    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random salt",
            json!({ "reason": e.to_string() }),
        )
    })?;

    Ok(hex::encode(buffer))
}

/// Returns true if `token` has the shape of an issued token.
pub fn is_valid_token(token: &str) -> bool {
    TOKEN_REGEX.is_match(token)
}

/// Returns true if `token` collides with a fixed route name.
pub fn is_reserved(token: &str) -> bool {
    RESERVED_TOKENS.contains(&token)
}
