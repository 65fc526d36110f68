//! Media URL resolution.
//!
//! The backend hands out a mix of absolute URLs, origin-relative paths and
//! bare filenames for avatars, post media, faculty photos and news images.
//! Everything display-bound goes through [`MediaUrlResolver`] once, at
//! load time.

pub const PLACEHOLDER_ASSET: &str = "/assets/placeholder-profile.png";

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct MediaUrlResolver {
    origin: String,
}

impl MediaUrlResolver {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        let mut origin = origin.into();
        while origin.ends_with('/') {
            origin.pop();
        }
        Self { origin }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute form of `path`: unchanged when it already carries a
    /// scheme, prefixed with the origin when origin-relative, treated as a
    /// bare filename otherwise.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_owned()
        } else if path.starts_with('/') {
            format!("{}{path}", self.origin)
        } else {
            format!("{}/{path}", self.origin)
        }
    }

    /// Like [`Self::resolve`], with missing or empty input mapped to the
    /// placeholder asset. Broken media never surfaces as an error.
    #[must_use]
    pub fn resolve_or_placeholder(&self, path: Option<&str>) -> String {
        match path {
            Some(path) if !path.is_empty() => self.resolve(path),
            _ => PLACEHOLDER_ASSET.to_owned(),
        }
    }
}
