//! Token and base-domain extraction from the `Host` header.

use crate::AppError;
use crate::config::RedirectMode;
use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Returns the raw `Host` header value (port included).
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the header is missing or not valid UTF-8.
pub fn raw_host(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))
}

/// Strips the port from a host and lowercases it.
///
/// Handles IPv6 literals (`[::1]:8080` → `[::1]`).
pub fn strip_port(host: &str) -> String {
    let hostname = if host.starts_with('[') {
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };

    hostname.to_ascii_lowercase()
}

/// Extracts the token carried as a subdomain label.
///
/// With a configured `base_domain`, the token is the single label directly in
/// front of it (`abc.short.test` with base `short.test` → `abc`). Without one,
/// the token is the first label of a host that has more than two labels.
/// IP literals and hosts without a token label yield an empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(subdomain_token("abc.example.com:3000", None), "abc");
/// assert_eq!(subdomain_token("abc.short.test", Some("short.test")), "abc");
/// assert_eq!(subdomain_token("example.com", None), "");
/// ```
pub fn subdomain_token(host: &str, base_domain: Option<&str>) -> String {
    let hostname = strip_port(host);

    if hostname.starts_with('[') || hostname.parse::<IpAddr>().is_ok() {
        return String::new();
    }

    match base_domain {
        Some(base) => {
            let base = base.trim_matches('.').to_ascii_lowercase();
            hostname
                .strip_suffix(&base)
                .and_then(|prefix| prefix.strip_suffix('.'))
                .filter(|label| !label.is_empty() && !label.contains('.'))
                .map(str::to_string)
                .unwrap_or_default()
        }
        None => {
            let labels: Vec<&str> = hostname.split('.').collect();
            if labels.len() > 2 {
                labels[0].to_string()
            } else {
                String::new()
            }
        }
    }
}

/// Derives the public base domain from the request host.
///
/// In subdomain mode the first label is dropped when the host has more than
/// two labels (a request to `abc.example.com` creates links under
/// `example.com`). In path mode the host is used as-is. The port is kept.
pub fn base_domain_from_host(host: &str, mode: RedirectMode) -> String {
    match mode {
        RedirectMode::Path => host.to_ascii_lowercase(),
        RedirectMode::Subdomain => {
            let host = host.to_ascii_lowercase();
            let parts: Vec<&str> = host.split('.').collect();
            if parts.len() > 2 {
                parts[1..].join(".")
            } else {
                host
            }
        }
    }
}

/// Builds the public short URL for a token.
///
/// - Subdomain mode: `{scheme}://{token}.{base_domain}`
/// - Path mode: `{scheme}://{base_domain}/{token}`
pub fn short_url(scheme: &str, base_domain: &str, token: &str, mode: RedirectMode) -> String {
    let base_domain = base_domain.trim_end_matches('/');
    match mode {
        RedirectMode::Subdomain => format!("{}://{}.{}", scheme, token, base_domain),
        RedirectMode::Path => format!("{}://{}/{}", scheme, base_domain, token),
    }
}
