use serde::{Deserialize, Serialize};
use std::fmt;

/// One configured backend, identified by its base URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Create an endpoint, normalising away trailing slashes.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');
        Self {
            url: trimmed.to_string(),
        }
    }

    /// Base URL without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Absolute URL for `path` on this endpoint.
    ///
    /// ```
    /// use notedeck::registry::Endpoint;
    ///
    /// let endpoint = Endpoint::new("http://localhost:3002/");
    /// assert_eq!(endpoint.join("/post"), "http://localhost:3002/post");
    /// assert_eq!(endpoint.join("post/7"), "http://localhost:3002/post/7");
    /// ```
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.url, path)
        } else {
            format!("{}/{}", self.url, path)
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl From<&str> for Endpoint {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for Endpoint {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}
