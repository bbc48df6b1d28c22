use crate::{UrlError, UrlResult};
use percent_encoding::percent_decode_str;
use url::Url;

/// Parses a target URL that a crawler wants to fetch
///
/// Only HTTP and HTTPS URLs with a host are accepted; anything else fails
/// fast instead of being defaulted.
///
/// # Examples
///
/// ```
/// use robots_gate::url::parse_target;
///
/// assert!(parse_target("https://example.com/page").is_ok());
/// assert!(parse_target("not a url").is_err());
/// assert!(parse_target("ftp://example.com/file").is_err());
/// ```
pub fn parse_target(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|source| UrlError::Parse {
        url: url_str.to_string(),
        source,
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    Ok(url)
}

/// Normalizes the path of a URL into the form robots patterns are matched against
///
/// # Normalization Steps
///
/// 1. Take the path component only (query and fragment never participate)
/// 2. Percent-decode it, so `/caf%C3%A9` and `/café` compare equal
/// 3. Lowercase it
/// 4. Strip leading slashes
/// 5. Ensure exactly one trailing slash
///
/// So `/Backend` becomes `backend/` and the root path becomes `/`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use robots_gate::url::normalize_request_path;
///
/// let url = Url::parse("https://example.com/Manual/vote-note.php?id=3").unwrap();
/// assert_eq!(normalize_request_path(&url), "manual/vote-note.php/");
/// ```
pub fn normalize_request_path(url: &Url) -> String {
    normalize_path(url.path())
}

/// Normalizes a raw path string; see [`normalize_request_path`]
pub fn normalize_path(path: &str) -> String {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    let mut normalized = decoded.to_lowercase().trim_start_matches('/').to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
