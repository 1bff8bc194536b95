//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Every REST path lives under this prefix
pub const API_PREFIX: &str = "/api/v1";

/// Endpoint that issues the `XSRF-TOKEN` cookie for cookie sessions
pub const CSRF_COOKIE_PATH: &str = "/sanctum/csrf-cookie";

/// Origin of the current page, e.g. "https://app.example.com"
pub fn app_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Get the origin of the backend
///
/// Taken from `COMPARADOR_API_URL` at build time; when it is not set the
/// backend is assumed to be served from the same origin as the app.
pub fn api_origin() -> String {
    match option_env!("COMPARADOR_API_URL") {
        Some(configured) if !configured.trim().is_empty() => {
            configured.trim().trim_end_matches('/').to_string()
        }
        _ => app_origin(),
    }
}

/// Join an origin and an API path under [`API_PREFIX`]
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::join_api_url;
/// assert_eq!(
///     join_api_url("https://api.example.com", "/comparisons"),
///     "https://api.example.com/api/v1/comparisons"
/// );
/// ```
pub fn join_api_url(origin: &str, path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}{}", origin, API_PREFIX, path)
    } else {
        format!("{}{}/{}", origin, API_PREFIX, path)
    }
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/comparisons/12/edit");
/// ```
pub fn api_url(path: &str) -> String {
    join_api_url(&api_origin(), path)
}

/// Truthy values of a build-time switch: "1", "true", "yes", "on"
pub fn flag_enabled(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Cookie session (Sanctum) mode, from `COMPARADOR_COOKIE_SESSION` at build time
///
/// Off by default: requests authenticate with the Bearer token only.
pub fn cookie_session_enabled() -> bool {
    flag_enabled(option_env!("COMPARADOR_COOKIE_SESSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_api_url() {
        assert_eq!(
            join_api_url("http://localhost:8000/", "/me"),
            "http://localhost:8000/api/v1/me"
        );
        assert_eq!(join_api_url("", "comparisons"), "/api/v1/comparisons");
    }

    #[test]
    fn test_flag_enabled() {
        assert!(flag_enabled(Some("1")));
        assert!(flag_enabled(Some(" TRUE ")));
        assert!(!flag_enabled(Some("0")));
        assert!(!flag_enabled(Some("")));
        assert!(!flag_enabled(None));
    }
}
