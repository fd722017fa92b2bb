//! Construction of outbound redirect targets.
//!
//! A redirect starts from the stored target URL and may absorb parts of the
//! inbound request: the path suffix after the token, the query string, and
//! (opt-in) the request headers serialized as query parameters.

use url::Url;

/// Which parts of the inbound request are merged into the redirect target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardingPolicy {
    /// Append the path suffix after the token to the target path.
    pub path: bool,
    /// Append inbound query parameters after the target's own parameters.
    pub query: bool,
    /// Append every inbound header as a `name=value` query parameter.
    ///
    /// Header values are user-controlled and end up in the target's query
    /// string, which lets clients inject arbitrary parameters into the
    /// destination. Disabled by default.
    pub headers: bool,
}

impl Default for ForwardingPolicy {
    fn default() -> Self {
        Self {
            path: true,
            query: true,
            headers: false,
        }
    }
}

/// Inbound request data relevant to redirect construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Path segments after the token, without the leading slash.
    pub extra_path: Option<String>,
    /// Raw query string, without the leading `?`.
    pub query: Option<String>,
    /// Inbound headers as `(lowercase name, value)` pairs.
    pub headers: Vec<(String, String)>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extra_path(mut self, extra_path: impl Into<String>) -> Self {
        self.extra_path = Some(extra_path.into());
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Builds the outbound redirect URL from a stored target and the inbound request.
///
/// # Rules
///
/// 1. **Path**: a non-empty suffix is joined onto the target path with exactly
///    one `/` (trailing slashes on the target path are trimmed first)
/// 2. **Query**: parameters already on the target are kept in place; inbound
///    parameters are appended after them
/// 3. **Headers**: when enabled, each header becomes one more query parameter
/// 4. **Fragment**: the target's fragment is kept
///
/// # Errors
///
/// Returns [`url::ParseError`] if the stored target is not an absolute URL.
///
/// # Examples
///
/// ```ignore
/// let ctx = RequestContext::new().with_extra_path("extra");
/// let url = build_redirect_target("https://example.com/base/", &ctx, &ForwardingPolicy::default())?;
/// assert_eq!(url.as_str(), "https://example.com/base/extra");
/// ```
pub fn build_redirect_target(
    target_url: &str,
    ctx: &RequestContext,
    policy: &ForwardingPolicy,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(target_url)?;

    if policy.path
        && let Some(extra) = ctx.extra_path.as_deref()
    {
        let extra = extra.trim_start_matches('/');
        if !extra.is_empty() {
            let joined = format!("{}/{}", url.path().trim_end_matches('/'), extra);
            url.set_path(&joined);
        }
    }

    if policy.query
        && let Some(query) = ctx.query.as_deref()
    {
        let inbound: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        if !inbound.is_empty() {
            url.query_pairs_mut().extend_pairs(inbound);
        }
    }

    if policy.headers && !ctx.headers.is_empty() {
        url.query_pairs_mut().extend_pairs(
            ctx.headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        );
    }

    Ok(url)
}
