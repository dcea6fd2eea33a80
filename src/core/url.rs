//! Branded URL types for the three address spaces.
//!
//! A reference moves through three distinct spaces during analysis:
//!
//! - [`PackageRelativeUrl`]: typed by a user at a tool boundary, interpreted
//!   against the package root
//! - [`FileRelativeUrl`]: found inside a document's markup, interpreted
//!   against the resolved URL of the containing document
//! - [`ResolvedUrl`]: the canonical de-duplication key, produced only by a
//!   resolver
//!
//! The newtypes exist so the three spaces cannot be silently substituted for
//! one another. Only resolver implementations can brand a string as resolved.

use std::borrow::Borrow;
use std::sync::Arc;

use serde::Serialize;

/// Canonical, de-duplicating key for a document within one analysis session.
///
/// Invariants:
/// - Two references denoting the same logical document resolve to
///   byte-identical values (this is the dictionary key for "have I already
///   visited this document?")
/// - Produced only by a resolver; there is no public constructor
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedUrl(Arc<str>);

impl ResolvedUrl {
    /// Brand a string as resolved. Restricted to resolver implementations.
    pub(crate) fn brand(url: impl Into<String>) -> Self {
        Self(Arc::from(url.into()))
    }

    /// Get the canonical URL as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ResolvedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ResolvedUrl {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ResolvedUrl {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for ResolvedUrl {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

// Serialize only. Deserializing would let callers mint resolved URLs that no
// resolver produced, breaking the branding guarantee.
impl Serialize for ResolvedUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

/// Entry-point reference as typed by a user, interpreted against the
/// package root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRelativeUrl(Arc<str>);

impl PackageRelativeUrl {
    /// Wrap a raw reference string. No normalization happens here; the
    /// resolver interprets the text.
    pub fn new(url: impl Into<String>) -> Self {
        Self(Arc::from(url.into()))
    }

    /// Get the reference text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageRelativeUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PackageRelativeUrl {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PackageRelativeUrl {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Reference found inside a document, interpreted against the resolved URL
/// of the document containing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileRelativeUrl(Arc<str>);

impl FileRelativeUrl {
    /// Wrap a raw href/import string as it appears in the markup.
    pub fn new(url: impl Into<String>) -> Self {
        Self(Arc::from(url.into()))
    }

    /// Get the reference text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FileRelativeUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FileRelativeUrl {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FileRelativeUrl {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for FileRelativeUrl {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for FileRelativeUrl {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality() {
        let a = ResolvedUrl::brand("sub/package/foo/foo.html");
        let b = ResolvedUrl::brand("sub/package/foo/foo.html");
        let c = ResolvedUrl::brand("different/x/y/bar.html");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "sub/package/foo/foo.html");
    }

    #[test]
    fn test_usable_as_map_key() {
        use rustc_hash::FxHashSet;

        let mut visited = FxHashSet::default();
        visited.insert(ResolvedUrl::brand("different/x/y/bar.html"));
        visited.insert(ResolvedUrl::brand("different/x/y/bar.html")); // duplicate

        assert_eq!(visited.len(), 1);
        // Borrow<str> allows lookup without re-branding
        assert!(visited.contains("different/x/y/bar.html"));
    }

    #[test]
    fn test_ordering() {
        let a = ResolvedUrl::brand("a.html");
        let b = ResolvedUrl::brand("b.html");
        assert!(a < b);
    }

    #[test]
    fn test_serialize() {
        let url = ResolvedUrl::brand("sub/package/foo/foo.html");
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, r#""sub/package/foo/foo.html""#);
    }

    #[test]
    fn test_display() {
        let url = FileRelativeUrl::new("../bar/bar.html");
        assert_eq!(format!("{}", url), "../bar/bar.html");
    }

    #[test]
    fn test_unresolved_wrappers_preserve_text() {
        // No normalization at the boundary; resolvers interpret the text
        let pkg = PackageRelativeUrl::new("./foo/../foo/foo.html");
        assert_eq!(pkg.as_str(), "./foo/../foo/foo.html");

        let file = FileRelativeUrl::new("foo.css?v=1#top");
        assert_eq!(file.as_str(), "foo.css?v=1#top");
    }
}
