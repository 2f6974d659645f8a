//! Cross-origin policy: every origin, method and header is allowed, and
//! credentials are permitted.
//!
//! With credentials allowed, a wildcard origin is not honoured by browsers for
//! credentialed requests, so the caller's `Origin` is echoed whenever the
//! request carries cookies, and always on preflight.

pub const ALLOWED_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
pub const MAX_AGE_SECS: &str = "600";

pub type HeaderPair = (&'static str, String);

/// True for a CORS preflight: `OPTIONS` with both `Origin` and
/// `Access-Control-Request-Method`.
pub fn is_preflight(is_options: bool, origin: Option<&str>, request_method: Option<&str>) -> bool {
    is_options && origin.is_some() && request_method.is_some()
}

/// Headers added to an ordinary response. Empty when the request had no `Origin`.
pub fn simple_headers(origin: Option<&str>, has_cookie: bool) -> Vec<HeaderPair> {
    let Some(origin) = origin else {
        return Vec::new();
    };

    let mut headers = vec![("Access-Control-Allow-Credentials", "true".to_owned())];
    if has_cookie {
        headers.push(("Access-Control-Allow-Origin", origin.to_owned()));
        headers.push(("Vary", "Origin".to_owned()));
    } else {
        headers.push(("Access-Control-Allow-Origin", "*".to_owned()));
    }
    headers
}

/// Headers for a preflight answer. Requested headers are echoed back as allowed.
pub fn preflight_headers(origin: &str, requested_headers: Option<&str>) -> Vec<HeaderPair> {
    let mut headers = vec![
        ("Access-Control-Allow-Origin", origin.to_owned()),
        ("Vary", "Origin".to_owned()),
        ("Access-Control-Allow-Methods", ALLOWED_METHODS.to_owned()),
        ("Access-Control-Max-Age", MAX_AGE_SECS.to_owned()),
        ("Access-Control-Allow-Credentials", "true".to_owned()),
    ];
    if let Some(requested) = requested_headers.filter(|h| !h.trim().is_empty()) {
        headers.push(("Access-Control-Allow-Headers", requested.to_owned()));
    }
    headers
}
