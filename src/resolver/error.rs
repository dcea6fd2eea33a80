//! Resolution error types.

use thiserror::Error;

/// Errors produced while translating between address spaces.
///
/// Two severities share this enum:
///
/// - [`Unresolvable`](ResolveError::Unresolvable) is soft: the reference is
///   malformed at the data level and batch analysis may log it and continue.
///   `resolve` swallows it into `None`; the other operations surface it.
/// - [`UnmappedUrl`](ResolveError::UnmappedUrl) and
///   [`UnmappedPath`](ResolveError::UnmappedPath) are hard: an incomplete
///   indirection table is a caller configuration defect, and continuing
///   would silently corrupt graph identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Reference has valid syntax but cannot be normalized.
    #[error("cannot normalize `{url}`: undecodable percent-encoding")]
    Unresolvable {
        /// The offending reference text
        url: String,
    },

    /// No indirection-table entry maps this virtual URL onto storage.
    #[error("no known mapping onto the filesystem for url: {url}")]
    UnmappedUrl {
        /// The virtual-URL-space key that was missing
        url: String,
    },

    /// No indirection-table entry maps this storage path onto URL space.
    #[error("no known mapping onto url space for filesystem path: {path}")]
    UnmappedPath {
        /// The storage-path key that was missing
        path: String,
    },
}

impl ResolveError {
    /// Check whether this error indicates a caller configuration defect
    /// that should abort the run rather than be skipped.
    pub const fn is_config_defect(&self) -> bool {
        matches!(self, Self::UnmappedUrl { .. } | Self::UnmappedPath { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_split() {
        let soft = ResolveError::Unresolvable {
            url: "%E0%A4%A".to_string(),
        };
        assert!(!soft.is_config_defect());

        let hard = ResolveError::UnmappedUrl {
            url: "/components/baz/baz.html".to_string(),
        };
        assert!(hard.is_config_defect());

        let hard = ResolveError::UnmappedPath {
            path: "sub/package/baz.html".to_string(),
        };
        assert!(hard.is_config_defect());
    }

    #[test]
    fn test_error_carries_missing_key() {
        let err = ResolveError::UnmappedUrl {
            url: "/components/baz/baz.html".to_string(),
        };
        assert!(err.to_string().contains("/components/baz/baz.html"));
    }
}
