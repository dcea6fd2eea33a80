//! Resolver contract and the two concrete strategies.
//!
//! Every resolver translates between three address spaces: the
//! package-relative reference a user types at a tool boundary, the
//! file-relative reference found inside a document, and the canonical
//! [`ResolvedUrl`] the analysis pipeline keys its graph on.
//!
//! Two strategies exist and the set is closed:
//!
//! - [`PackageUrlResolver`]: infers canonical URLs from filesystem layout
//!   plus a dependency-directory convention
//! - [`IndirectUrlResolver`]: looks canonical URLs up in an explicit
//!   bidirectional table, for codebases whose storage layout and logical
//!   layout diverge arbitrarily
//!
//! An orchestrator with more than one resolver configured routes through
//! [`ResolverChain`], which delegates to the first member whose
//! `can_resolve` answers affirmatively.
//!
//! All operations are pure functions over construction-time data: no I/O,
//! no shared mutable state, safe to call from parallel analysis tasks.

mod error;
mod indirect;
mod package;
mod platform;

use std::sync::OnceLock;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::core::{FileRelativeUrl, PackageRelativeUrl, ResolvedUrl};

pub use error::ResolveError;
pub use indirect::{IndirectUrlResolver, IndirectionTable};
pub use package::PackageUrlResolver;
pub use platform::{Platform, fs_path_for_pathname, pathname_for_fs_path};

/// The capability set every resolver variant implements.
pub trait UrlResolver {
    /// Can this resolver handle this reference?
    ///
    /// Inspects only syntactic shape (scheme/host presence); never touches
    /// storage. A `false` answer is a routing signal for fallback chains,
    /// not an error. A resolver that answers `false` must never be asked
    /// to resolve that reference.
    fn can_resolve(&self, url: &str) -> bool;

    /// Resolve a top-level (entry-point) reference against the package root.
    ///
    /// Returns `None` only when the reference is fundamentally
    /// unresolvable (undecodable percent-encoding). Valid syntax with no
    /// table mapping is a hard failure surfaced by [`resolve_file_url`]
    /// and [`relative`], never a silent `None`.
    ///
    /// [`resolve_file_url`]: UrlResolver::resolve_file_url
    /// [`relative`]: UrlResolver::relative
    fn resolve(&self, url: &PackageRelativeUrl) -> Option<ResolvedUrl>;

    /// Resolve a reference found inside the document identified by `base`.
    fn resolve_file_url(
        &self,
        url: &FileRelativeUrl,
        base: &ResolvedUrl,
    ) -> Result<ResolvedUrl, ResolveError>;

    /// Compute the text that, placed inside the document `from`, would
    /// resolve back to `to` via [`resolve_file_url`].
    ///
    /// [`resolve_file_url`]: UrlResolver::resolve_file_url
    fn relative(&self, from: &ResolvedUrl, to: &ResolvedUrl)
    -> Result<FileRelativeUrl, ResolveError>;
}

// ============================================================================
// Closed variant set
// ============================================================================

/// Closed set of resolver strategies.
///
/// The orchestrator's fallback logic only needs the four contract
/// operations, so the variants are a tagged enum rather than an
/// open-ended trait-object hierarchy.
#[derive(Debug)]
pub enum Resolver {
    /// Convention-based resolution from filesystem layout.
    Package(PackageUrlResolver),
    /// Table-based resolution through an indirection map.
    Indirect(IndirectUrlResolver),
}

impl UrlResolver for Resolver {
    fn can_resolve(&self, url: &str) -> bool {
        match self {
            Self::Package(r) => r.can_resolve(url),
            Self::Indirect(r) => r.can_resolve(url),
        }
    }

    fn resolve(&self, url: &PackageRelativeUrl) -> Option<ResolvedUrl> {
        match self {
            Self::Package(r) => r.resolve(url),
            Self::Indirect(r) => r.resolve(url),
        }
    }

    fn resolve_file_url(
        &self,
        url: &FileRelativeUrl,
        base: &ResolvedUrl,
    ) -> Result<ResolvedUrl, ResolveError> {
        match self {
            Self::Package(r) => r.resolve_file_url(url, base),
            Self::Indirect(r) => r.resolve_file_url(url, base),
        }
    }

    fn relative(
        &self,
        from: &ResolvedUrl,
        to: &ResolvedUrl,
    ) -> Result<FileRelativeUrl, ResolveError> {
        match self {
            Self::Package(r) => r.relative(from, to),
            Self::Indirect(r) => r.relative(from, to),
        }
    }
}

impl From<PackageUrlResolver> for Resolver {
    fn from(r: PackageUrlResolver) -> Self {
        Self::Package(r)
    }
}

impl From<IndirectUrlResolver> for Resolver {
    fn from(r: IndirectUrlResolver) -> Self {
        Self::Indirect(r)
    }
}

// ============================================================================
// Fallback chain
// ============================================================================

/// Ordered fallback chain over registered resolvers.
///
/// Each operation delegates to the first member whose `can_resolve`
/// answers true for the reference text (`relative` routes on the target
/// URL). An empty or exhausted chain yields `None` from `resolve` and
/// [`ResolveError::Unresolvable`] from the fallible operations.
#[derive(Debug, Default)]
pub struct ResolverChain {
    resolvers: Vec<Resolver>,
}

impl ResolverChain {
    /// Create a chain from resolvers in delegation order.
    pub fn new(resolvers: impl IntoIterator<Item = Resolver>) -> Self {
        Self {
            resolvers: resolvers.into_iter().collect(),
        }
    }

    /// Append a resolver at the end of the chain.
    pub fn push(&mut self, resolver: impl Into<Resolver>) {
        self.resolvers.push(resolver.into());
    }

    /// Number of registered resolvers.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Check whether the chain has no resolvers.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    fn route(&self, url: &str) -> Option<&Resolver> {
        self.resolvers.iter().find(|r| r.can_resolve(url))
    }
}

impl UrlResolver for ResolverChain {
    fn can_resolve(&self, url: &str) -> bool {
        self.route(url).is_some()
    }

    fn resolve(&self, url: &PackageRelativeUrl) -> Option<ResolvedUrl> {
        self.route(url.as_str())?.resolve(url)
    }

    fn resolve_file_url(
        &self,
        url: &FileRelativeUrl,
        base: &ResolvedUrl,
    ) -> Result<ResolvedUrl, ResolveError> {
        match self.route(url.as_str()) {
            Some(resolver) => resolver.resolve_file_url(url, base),
            None => Err(ResolveError::Unresolvable {
                url: url.as_str().to_string(),
            }),
        }
    }

    fn relative(
        &self,
        from: &ResolvedUrl,
        to: &ResolvedUrl,
    ) -> Result<FileRelativeUrl, ResolveError> {
        match self.route(to.as_str()) {
            Some(resolver) => resolver.relative(from, to),
            None => Err(ResolveError::Unresolvable {
                url: to.as_str().to_string(),
            }),
        }
    }
}

// ============================================================================
// Shared URL algebra
// ============================================================================

/// Dummy authority for joining urlspace paths with standard URL semantics.
fn urlspace_base() -> &'static Url {
    static BASE: OnceLock<Url> = OnceLock::new();
    BASE.get_or_init(|| Url::parse("http://x").unwrap())
}

/// Percent-decode, falling back to the raw text on invalid UTF-8.
pub(crate) fn decode_or_raw(encoded: &str) -> String {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| encoded.to_string())
}

/// Percent-decode strictly; undecodable input is the soft failure case.
pub(crate) fn decode_pathname(encoded: &str, reference: &str) -> Result<String, ResolveError> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|_| ResolveError::Unresolvable {
            url: reference.to_string(),
        })
}

/// Join a link reference onto an absolute urlspace path with ordinary
/// URL-join semantics (`.`/`..` resolution, query/fragment stripped).
/// Returns the decoded joined path.
pub(crate) fn urlspace_resolve(base_path: &str, reference: &str) -> Option<String> {
    let base = urlspace_base().join(base_path).ok()?;
    let joined = base.join(reference).ok()?;
    Some(decode_or_raw(joined.path()))
}

/// Directory-relative path between two absolute urlspace paths.
pub(crate) fn urlspace_relative(from_path: &str, to_path: &str) -> Option<String> {
    let from = urlspace_base().join(from_path).ok()?;
    let to = urlspace_base().join(to_path).ok()?;
    from.make_relative(&to).map(|rel| decode_or_raw(&rel))
}
