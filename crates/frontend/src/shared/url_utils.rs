//! Link helpers for the public presentation and the presentation video.

pub const INVALID_VIDEO_LINK: &str = "Informe um link válido (começando com http(s)://).";

/// Value of the `signature` query parameter of a URL, URL-decoded
pub fn extract_signature(url: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != "signature" || value.is_empty() {
            return None;
        }
        urlencoding::decode(value).ok().map(|v| v.into_owned())
    })
}

/// Route of the public presentation inside this app
pub fn public_presentation_path(id: &str) -> String {
    format!("/comparisons/{}/presentation", id)
}

/// Shareable link of a comparison
///
/// The signature of the backend-issued URL is carried over; without one the
/// link is unsigned and the presentation page will refuse it.
///
/// # Example
/// ```rust
/// use frontend::shared::url_utils::presentation_link;
/// assert_eq!(
///     presentation_link("https://app.test", "7", Some("https://api.test/x?signature=a%2Fb")),
///     "https://app.test/comparisons/7/presentation?signature=a%2Fb"
/// );
/// ```
pub fn presentation_link(origin: &str, id: &str, signed_url: Option<&str>) -> String {
    let base = format!(
        "{}{}",
        origin.trim_end_matches('/'),
        public_presentation_path(id)
    );
    match signed_url.and_then(extract_signature) {
        Some(signature) => format!("{}?signature={}", base, urlencoding::encode(&signature)),
        None => base,
    }
}

/// Normalise a video link typed by the user
///
/// `Ok(None)` clears the field, `Ok(Some(url))` stores the trimmed url.
pub fn validate_video_link(raw: &str) -> Result<Option<String>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| INVALID_VIDEO_LINK.to_string())?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(INVALID_VIDEO_LINK.to_string());
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_signature() {
        assert_eq!(
            extract_signature("https://api.test/p/1?expires=9&signature=abc%3D#top").as_deref(),
            Some("abc=")
        );
        assert_eq!(extract_signature("https://api.test/p/1?signature="), None);
        assert_eq!(extract_signature("https://api.test/p/1"), None);
    }

    #[test]
    fn test_presentation_link_unsigned() {
        assert_eq!(
            presentation_link("https://app.test/", "12", None),
            "https://app.test/comparisons/12/presentation"
        );
        assert_eq!(
            presentation_link("https://app.test", "12", Some("https://api.test/p/12")),
            "https://app.test/comparisons/12/presentation"
        );
    }

    #[test]
    fn test_validate_video_link() {
        assert_eq!(validate_video_link("   "), Ok(None));
        assert_eq!(
            validate_video_link(" https://youtu.be/xyz "),
            Ok(Some("https://youtu.be/xyz".to_string()))
        );
        assert_eq!(
            validate_video_link("youtu.be/xyz"),
            Err(INVALID_VIDEO_LINK.to_string())
        );
        assert_eq!(
            validate_video_link("http:///path"),
            Err(INVALID_VIDEO_LINK.to_string())
        );
    }
}
