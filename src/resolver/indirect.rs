//! Table-based resolution through an indirection map.
//!
//! Some codebases serve documents from a virtual URL space whose mapping
//! onto real storage locations is arbitrary and precomputed rather than
//! derivable from directory structure. This resolver holds that mapping as
//! two eager lookup tables and translates between the spaces.
//!
//! Canonical URLs produced here live in storage-path space (SourceRoot-
//! relative, forward-slash separated), not virtual-URL space: `resolve`
//! yields storage paths directly, and the tables are consulted only when a
//! reference must be interpreted relative to a containing document.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{FileRelativeUrl, LinkKind, PackageRelativeUrl, ResolvedUrl};
use crate::utils::path::{join_posix, normalize_posix, relative_posix, strip_query_fragment};

use super::{
    ResolveError, UrlResolver, decode_or_raw, decode_pathname, urlspace_relative, urlspace_resolve,
};

// ============================================================================
// IndirectionTable
// ============================================================================

/// One virtual-URL-space to storage-path association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndirectionEntry {
    /// Virtual-URL-space path, forward-slash separated.
    pub url: String,
    /// Storage path, SourceRoot-relative, forward-slash separated.
    pub path: String,
}

/// Ordered, caller-supplied mapping between virtual URL space and storage
/// paths.
///
/// Entries keep their supplied order; when the same key appears twice, the
/// last entry wins once the lookup tables are built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndirectionTable {
    entries: Vec<IndirectionEntry>,
}

impl IndirectionTable {
    /// Build a table from (virtual path, storage path) pairs in order.
    pub fn from_pairs<U, P>(pairs: impl IntoIterator<Item = (U, P)>) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(url, path)| IndirectionEntry {
                    url: url.into(),
                    path: path.into(),
                })
                .collect(),
        }
    }

    /// Iterate entries in supplied order.
    pub fn iter(&self) -> impl Iterator<Item = &IndirectionEntry> {
        self.entries.iter()
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<IndirectionEntry> for IndirectionTable {
    fn from_iter<T: IntoIterator<Item = IndirectionEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// IndirectUrlResolver
// ============================================================================

/// Resolves references through a precomputed indirection table.
#[derive(Debug)]
pub struct IndirectUrlResolver {
    /// Boundary outside which no document may be addressed.
    source_root: String,
    /// Directory entry-point references are interpreted against.
    package_root: String,
    /// Virtual URL (leading slash) -> storage path (no leading slash).
    urlspace_to_filesystem: FxHashMap<String, String>,
    /// Storage path -> virtual URL.
    filesystem_to_urlspace: FxHashMap<String, String>,
}

impl IndirectUrlResolver {
    /// Create a resolver over `table`.
    ///
    /// `source_root` bounds everything that is legal to address;
    /// `package_root` is where entry-point references are interpreted. Both
    /// directions of the table are built eagerly here; duplicate keys
    /// collapse to the last entry.
    pub fn new(
        source_root: impl Into<String>,
        package_root: impl Into<String>,
        table: IndirectionTable,
    ) -> Self {
        let source_root = normalize_posix(&source_root.into());
        let package_root = normalize_posix(&package_root.into());

        let mut urlspace_to_filesystem =
            FxHashMap::with_capacity_and_hasher(table.len(), Default::default());
        let mut filesystem_to_urlspace =
            FxHashMap::with_capacity_and_hasher(table.len(), Default::default());
        for entry in table.iter() {
            let url = canonical_urlspace_key(&entry.url);
            let path = entry.path.trim_start_matches('/').to_string();
            urlspace_to_filesystem.insert(url.clone(), path.clone());
            filesystem_to_urlspace.insert(path, url);
        }

        Self {
            source_root,
            package_root,
            urlspace_to_filesystem,
            filesystem_to_urlspace,
        }
    }

    /// Clamp an absolute path to a SourceRoot-relative storage path.
    ///
    /// Escape attempts are truncated, not rejected: after full
    /// normalization, every leading up-segment of the root-relative path is
    /// dropped in one pass, so the result is order-independent and never
    /// begins with `/` or `../`.
    fn clamp_to_root(&self, absolute: &str) -> String {
        let relative = relative_posix(&self.source_root, absolute);
        let mut rest = relative.as_str();
        while let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        }
        let rest = rest.trim_start_matches('/');
        if rest == ".." || rest == "." {
            String::new()
        } else {
            rest.to_string()
        }
    }
}

impl UrlResolver for IndirectUrlResolver {
    fn can_resolve(&self, url: &str) -> bool {
        // Local references only: anything carrying a scheme or host is
        // someone else's to resolve
        !LinkKind::parse(url).has_scheme_or_host()
    }

    fn resolve(&self, url: &PackageRelativeUrl) -> Option<ResolvedUrl> {
        let reference =
            decode_pathname(strip_query_fragment(url.as_str()), url.as_str()).ok()?;
        let full = join_posix(&self.package_root, &reference);
        Some(ResolvedUrl::brand(self.clamp_to_root(&full)))
    }

    fn resolve_file_url(
        &self,
        url: &FileRelativeUrl,
        base: &ResolvedUrl,
    ) -> Result<ResolvedUrl, ResolveError> {
        let web_base = self
            .filesystem_to_urlspace
            .get(base.as_str())
            .ok_or_else(|| ResolveError::UnmappedPath {
                path: base.as_str().to_string(),
            })?;
        let web_final =
            urlspace_resolve(web_base, url.as_str()).ok_or_else(|| ResolveError::Unresolvable {
                url: url.as_str().to_string(),
            })?;
        let storage = self
            .urlspace_to_filesystem
            .get(&web_final)
            .ok_or(ResolveError::UnmappedUrl { url: web_final })?;
        Ok(ResolvedUrl::brand(storage.as_str()))
    }

    fn relative(
        &self,
        from: &ResolvedUrl,
        to: &ResolvedUrl,
    ) -> Result<FileRelativeUrl, ResolveError> {
        let from_web = self
            .filesystem_to_urlspace
            .get(from.as_str())
            .ok_or_else(|| ResolveError::UnmappedPath {
                path: from.as_str().to_string(),
            })?;
        let to_web = self
            .filesystem_to_urlspace
            .get(to.as_str())
            .ok_or_else(|| ResolveError::UnmappedPath {
                path: to.as_str().to_string(),
            })?;
        let text =
            urlspace_relative(from_web, to_web).ok_or_else(|| ResolveError::Unresolvable {
                url: to.as_str().to_string(),
            })?;
        Ok(FileRelativeUrl::new(text))
    }
}

/// Virtual-URL keys are stored decoded with a leading slash, whichever
/// form the caller supplied them in.
fn canonical_urlspace_key(url: &str) -> String {
    let decoded = decode_or_raw(url);
    if decoded.starts_with('/') {
        decoded
    } else {
        format!("/{}", decoded)
    }
}
