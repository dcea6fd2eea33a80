//! Link classification utilities.
//!
//! Purely syntactic: classification looks at the reference text only and
//! never touches storage. Resolvers use it to answer `can_resolve` and to
//! route references between the local-file and pass-through paths.

use crate::utils::path::is_external_link;

/// Syntactic classification of references
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// Reference with a URL scheme (https://, mailto:, file:, etc.)
    External(&'a str),
    /// Scheme-relative reference with a host (//cdn.example.com/x.js)
    SchemeRelative(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Package-root-relative path (/foo/foo.html).
    RootRelative(&'a str),
    /// File-relative path (./foo.css, ../bar/bar.html, foo.html).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a reference string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if link.starts_with("//") {
            Self::SchemeRelative(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::RootRelative(link)
        } else {
            Self::FileRelative(link)
        }
    }

    /// Check if the reference carries a scheme or host of its own.
    ///
    /// References without either are local by construction and every
    /// resolver variant can at least attempt them.
    #[inline]
    pub fn has_scheme_or_host(&self) -> bool {
        matches!(self, Self::External(_) | Self::SchemeRelative(_))
    }

    /// The scheme of an external reference, without the trailing colon.
    pub fn scheme(&self) -> Option<&'a str> {
        match self {
            Self::External(link) => link.split(':').next(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external() {
        assert!(matches!(
            LinkKind::parse("https://example.com"),
            LinkKind::External("https://example.com")
        ));
        assert!(matches!(
            LinkKind::parse("mailto:user@example.com"),
            LinkKind::External("mailto:user@example.com")
        ));
        assert!(matches!(
            LinkKind::parse("file:///root/pkg/foo.html"),
            LinkKind::External("file:///root/pkg/foo.html")
        ));
    }

    #[test]
    fn test_parse_scheme_relative() {
        assert!(matches!(
            LinkKind::parse("//cdn.example.com/x.js"),
            LinkKind::SchemeRelative("//cdn.example.com/x.js")
        ));
    }

    #[test]
    fn test_parse_fragment() {
        assert!(matches!(
            LinkKind::parse("#section"),
            LinkKind::Fragment("section")
        ));
        assert!(matches!(LinkKind::parse("#"), LinkKind::Fragment("")));
    }

    #[test]
    fn test_parse_root_relative() {
        assert!(matches!(
            LinkKind::parse("/foo/foo.html"),
            LinkKind::RootRelative("/foo/foo.html")
        ));
    }

    #[test]
    fn test_parse_file_relative() {
        assert!(matches!(
            LinkKind::parse("./foo.css"),
            LinkKind::FileRelative("./foo.css")
        ));
        assert!(matches!(
            LinkKind::parse("../bar/bar.html"),
            LinkKind::FileRelative("../bar/bar.html")
        ));
        assert!(matches!(
            LinkKind::parse("foo.html"),
            LinkKind::FileRelative("foo.html")
        ));
    }

    #[test]
    fn test_has_scheme_or_host() {
        assert!(LinkKind::parse("https://example.com").has_scheme_or_host());
        assert!(LinkKind::parse("//host/x").has_scheme_or_host());
        assert!(!LinkKind::parse("/foo.html").has_scheme_or_host());
        assert!(!LinkKind::parse("../foo.html").has_scheme_or_host());
        assert!(!LinkKind::parse("#top").has_scheme_or_host());
    }

    #[test]
    fn test_scheme() {
        assert_eq!(LinkKind::parse("file:///x").scheme(), Some("file"));
        assert_eq!(LinkKind::parse("https://x").scheme(), Some("https"));
        assert_eq!(LinkKind::parse("./x").scheme(), None);
    }
}
