//! Validation of submitted target URLs.
//!
//! Target URLs are stored exactly as submitted (minus surrounding whitespace);
//! validation only guarantees they can later be parsed into a redirect target.

use url::Url;

/// Errors that can occur while validating a target URL.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetUrlError {
    #[error("URL is required")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Characters stripped from URLs echoed back to clients.
const DISPLAY_UNSAFE_CHARS: &[char] = &['<', '>', '"', '\'', '&'];

/// Validates that `input` is an absolute HTTP(S) URL with a host.
///
/// Returns the trimmed input on success.
///
/// # Security
///
/// Rejects schemes like `javascript:`, `data:` and `file:` so the service
/// cannot be used to bounce browsers to non-web targets.
///
/// # Errors
///
/// - [`TargetUrlError::Empty`] for empty or whitespace-only input
/// - [`TargetUrlError::InvalidFormat`] for relative or malformed URLs
/// - [`TargetUrlError::UnsupportedProtocol`] for non-HTTP(S) schemes
/// - [`TargetUrlError::MissingHost`] when no host is present
pub fn validate_target_url(input: &str) -> Result<&str, TargetUrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TargetUrlError::Empty);
    }

    let url = Url::parse(trimmed).map_err(|e| TargetUrlError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(TargetUrlError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(TargetUrlError::MissingHost);
    }

    Ok(trimmed)
}

/// Removes HTML-significant characters from a URL before echoing it in a response.
pub fn sanitize_for_display(url: &str) -> String {
    url.chars()
        .filter(|c| !DISPLAY_UNSAFE_CHARS.contains(c))
        .collect()
}
