use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// The scope of a robots.txt file: a scheme plus a host
///
/// Two URLs share a robots.txt exactly when their origins compare equal.
/// The host is lowercased and carries the port when the URL names a
/// non-default one, so `http://127.0.0.1:8080` and `http://127.0.0.1:9090`
/// are distinct origins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
}

impl Origin {
    /// Derives the origin of an already-parsed URL
    ///
    /// # Returns
    ///
    /// * `Ok(Origin)` - The scheme and host of the URL
    /// * `Err(UrlError)` - The URL has no host
    ///
    /// # Examples
    ///
    /// ```
    /// use url::Url;
    /// use robots_gate::url::Origin;
    ///
    /// let url = Url::parse("https://EXAMPLE.COM/path?q=1").unwrap();
    /// let origin = Origin::from_url(&url).unwrap();
    /// assert_eq!(origin.key(), "https://example.com");
    /// ```
    pub fn from_url(url: &Url) -> UrlResult<Self> {
        let host = extract_host(url).ok_or_else(|| UrlError::MissingHost(url.to_string()))?;
        Ok(Self {
            scheme: url.scheme().to_lowercase(),
            host,
        })
    }

    /// Returns the scheme (e.g. `https`)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host, including a non-default port
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the identity key `scheme://host`
    pub fn key(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Returns the locator of this origin's robots.txt
    pub fn robots_txt_url(&self) -> UrlResult<Url> {
        let raw = format!("{}/robots.txt", self.key());
        Url::parse(&raw).map_err(|source| UrlError::Parse { url: raw, source })
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// Extracts the lowercase host of a URL, with the port appended when the
/// URL names a non-default one
fn extract_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}
