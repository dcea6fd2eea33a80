//! Convention-based resolution within a package.
//!
//! Canonical URLs are inferred purely from filesystem layout: a package
//! root directory plus a dependency-directory convention. No external
//! table is required.
//!
//! The one non-obvious rule is the sibling remap: a reference like
//! `../some-package/x.html` that walks up and out of the package really
//! means "the locally vendored copy of some-package", so paths landing in
//! the parent of the package root are re-rooted under
//! `<package>/<component-dir>/` instead of resolving outside the package.

use std::path::Path;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use url::Url;

use crate::core::{FileRelativeUrl, LinkKind, PackageRelativeUrl, ResolvedUrl};
use crate::utils::path::{dirname_posix, is_within, join_posix, normalize_posix, strip_query_fragment};

use super::platform::{Platform, fs_path_for_pathname, has_drive_prefix, pathname_for_fs_path};
use super::{ResolveError, UrlResolver, decode_pathname};

/// Default dependency-directory convention.
const DEFAULT_COMPONENT_DIR: &str = "components";

/// Characters escaped when re-encoding a decoded path into a file URL.
const PATH_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Resolves a reference to a canonical URL within a package.
#[derive(Debug, Clone)]
pub struct PackageUrlResolver {
    /// Package directory as given, absolutized (posix separators).
    raw_dir: String,
    /// Dependency directory name, no surrounding separators.
    component_dir: String,
    /// Hostname treated as local in addition to file/localhost.
    hostname: Option<String>,
    platform: Platform,

    // Derived at construction, immutable during resolution
    package_dir: String,
    package_url: Url,
    resolved_component_dir: String,
}

impl PackageUrlResolver {
    /// Create a resolver rooted at `package_dir`.
    ///
    /// Relative directories are resolved against the current working
    /// directory. Dependency directory defaults to `components`.
    pub fn new(package_dir: impl AsRef<Path>) -> Self {
        let raw = package_dir.as_ref().to_string_lossy().replace('\\', "/");
        let mut resolver = Self {
            raw_dir: raw,
            component_dir: DEFAULT_COMPONENT_DIR.to_string(),
            hostname: None,
            platform: Platform::host(),
            package_dir: String::new(),
            package_url: fallback_file_url(),
            resolved_component_dir: String::new(),
        };
        resolver.rebuild();
        resolver
    }

    /// Set the dependency-directory name used by the sibling remap.
    pub fn with_component_dir(mut self, name: impl Into<String>) -> Self {
        self.component_dir = name.into().trim_matches('/').to_string();
        self.rebuild();
        self
    }

    /// Treat references to this hostname as local.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Override the target platform (drive-letter handling).
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self.rebuild();
        self
    }

    /// The canonical URL of the package root itself.
    pub fn package_url(&self) -> ResolvedUrl {
        ResolvedUrl::brand(self.package_url.as_str())
    }

    /// Resolve an entry-point reference against an explicit document
    /// instead of the package root.
    pub fn resolve_from(&self, url: &PackageRelativeUrl, base: &ResolvedUrl) -> Option<ResolvedUrl> {
        let base_url = Url::parse(base.as_str()).ok()?;
        self.resolve_impl(url.as_str(), &base_url).ok()
    }

    fn rebuild(&mut self) {
        let absolute = if self.raw_dir.starts_with('/')
            || (self.platform == Platform::Windows && has_drive_prefix(&self.raw_dir))
        {
            self.raw_dir.clone()
        } else {
            let cwd = std::env::current_dir()
                .map(|d| d.to_string_lossy().replace('\\', "/"))
                .unwrap_or_else(|_| "/".to_string());
            format!("{}/{}", cwd.trim_end_matches('/'), self.raw_dir)
        };
        let pathname = pathname_for_fs_path(&normalize_posix(&absolute), self.platform).into_owned();
        self.package_dir = fs_path_for_pathname(&pathname, self.platform).into_owned();
        self.package_url = file_url_for_fs_path(&format!("{}/", self.package_dir), self.platform);
        self.resolved_component_dir = join_posix(&self.package_dir, &self.component_dir);
    }

    fn should_handle_as_file_url(&self, url: &Url) -> bool {
        let is_local_file = url.scheme() == "file"
            && url.host_str().is_none_or(|h| h.is_empty() || h == "localhost");
        let is_our_hostname = match (&self.hostname, url.host_str()) {
            (Some(ours), Some(host)) => ours == host,
            _ => false,
        };
        is_local_file || is_our_hostname
    }

    fn resolve_impl(&self, reference: &str, base: &Url) -> Result<ResolvedUrl, ResolveError> {
        let resolved = base.join(reference).map_err(|_| ResolveError::Unresolvable {
            url: reference.to_string(),
        })?;
        if self.should_handle_as_file_url(&resolved) {
            self.handle_file_url(&resolved, reference)
        } else {
            // Non-local schemes pass through structurally unmodified
            Ok(ResolvedUrl::brand(String::from(resolved)))
        }
    }

    fn handle_file_url(&self, resolved: &Url, reference: &str) -> Result<ResolvedUrl, ResolveError> {
        let fs_path = if let Some(pathname) = package_absolute_pathname(reference) {
            // An absolute pathname roots the reference at the package, not
            // at the filesystem
            let decoded = decode_pathname(&pathname, reference)?;
            join_posix(&self.package_dir, &normalize_posix(&decoded))
        } else {
            let decoded = decode_pathname(resolved.path(), reference)?;
            fs_path_for_pathname(&normalize_posix(&decoded), self.platform).into_owned()
        };

        // Sibling remap: a path landing beside the package is the locally
        // vendored copy of that sibling
        let parent = dirname_posix(&self.package_dir);
        let fs_path = if is_within(&fs_path, parent) && !is_within(&fs_path, &self.package_dir) {
            let remainder = fs_path[parent.len()..].trim_start_matches('/');
            join_posix(&self.resolved_component_dir, remainder)
        } else {
            fs_path
        };

        Ok(ResolvedUrl::brand(
            file_url_for_fs_path(&fs_path, self.platform).as_str(),
        ))
    }

    /// If `resolved` is a local file URL inside the dependency directory,
    /// return its filesystem-comparison path.
    ///
    /// `Ok(None)` means "not in the dependency directory"; an undecodable
    /// pathname is the soft error.
    fn pathname_for_component_dir_url(
        &self,
        resolved: &ResolvedUrl,
    ) -> Result<Option<String>, ResolveError> {
        let Ok(url) = Url::parse(resolved.as_str()) else {
            return Ok(None);
        };
        if !self.should_handle_as_file_url(&url) {
            return Ok(None);
        }
        let decoded = decode_pathname(url.path(), resolved.as_str())?;
        let fs_path = fs_path_for_pathname(&normalize_posix(&decoded), self.platform).into_owned();
        if is_within(&fs_path, &self.resolved_component_dir) {
            Ok(Some(fs_path))
        } else {
            Ok(None)
        }
    }

    fn parse_resolved(&self, resolved: &ResolvedUrl) -> Result<Url, ResolveError> {
        Url::parse(resolved.as_str()).map_err(|_| ResolveError::Unresolvable {
            url: resolved.as_str().to_string(),
        })
    }
}

impl UrlResolver for PackageUrlResolver {
    fn can_resolve(&self, url: &str) -> bool {
        match LinkKind::parse(url) {
            LinkKind::External(link) => match Url::parse(link) {
                Ok(parsed) => self.should_handle_as_file_url(&parsed),
                Err(_) => false,
            },
            LinkKind::SchemeRelative(link) => {
                let host = link[2..].split('/').next().unwrap_or("");
                self.hostname.as_deref() == Some(host)
            }
            // Scheme-less references are local by construction
            _ => true,
        }
    }

    fn resolve(&self, url: &PackageRelativeUrl) -> Option<ResolvedUrl> {
        // Soft failures are swallowed so batch analysis continues past one
        // bad entry point
        self.resolve_impl(url.as_str(), &self.package_url).ok()
    }

    fn resolve_file_url(
        &self,
        url: &FileRelativeUrl,
        base: &ResolvedUrl,
    ) -> Result<ResolvedUrl, ResolveError> {
        let base_url = self.parse_resolved(base)?;
        self.resolve_impl(url.as_str(), &base_url)
    }

    fn relative(
        &self,
        from: &ResolvedUrl,
        to: &ResolvedUrl,
    ) -> Result<FileRelativeUrl, ResolveError> {
        let from_url = self.parse_resolved(from)?;
        let mut to_url = self.parse_resolved(to)?;

        // Un-remap dependency-directory targets when the source is outside
        // the dependency directory: the target is logically one level above
        // the package root, so the emitted text round-trips through resolve
        if let Some(component_path) = self.pathname_for_component_dir_url(to)? {
            if self.pathname_for_component_dir_url(from)?.is_none() {
                let remainder = component_path[self.resolved_component_dir.len()..]
                    .trim_start_matches('/');
                if let Ok(reresolved) = self
                    .package_url
                    .join(&format!("../{}", encode_pathname(remainder)))
                {
                    to_url = reresolved;
                }
            }
        }

        let text = from_url
            .make_relative(&to_url)
            .unwrap_or_else(|| String::from(to_url));
        Ok(FileRelativeUrl::new(text))
    }
}

/// The pathname of a reference that roots at the package rather than the
/// filesystem: any non-`file:` reference whose own pathname begins with a
/// separator. This makes `/foo.html`, `//example.com/foo.html` and
/// `https://example.com/foo.html` all name `<package>/foo.html` once the
/// host is established as local.
fn package_absolute_pathname(reference: &str) -> Option<String> {
    match LinkKind::parse(reference) {
        LinkKind::RootRelative(link) => Some(strip_query_fragment(link).to_string()),
        LinkKind::SchemeRelative(link) => {
            let rest = &link[2..];
            let start = rest.find('/')?;
            Some(strip_query_fragment(&rest[start..]).to_string())
        }
        LinkKind::External(link) => {
            let url = Url::parse(link).ok()?;
            if url.scheme() != "file" && url.path().starts_with('/') {
                Some(url.path().to_string())
            } else {
                None
            }
        }
        _ => None,
    }
}

fn encode_pathname(decoded: &str) -> String {
    decoded
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_ESCAPE).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a `file:` URL from a filesystem-comparison path.
fn file_url_for_fs_path(path: &str, platform: Platform) -> Url {
    let pathname = pathname_for_fs_path(path, platform);
    let pathname = if pathname.starts_with('/') {
        pathname.into_owned()
    } else {
        format!("/{}", pathname)
    };
    Url::parse(&format!("file://{}", encode_pathname(&pathname)))
        .unwrap_or_else(|_| fallback_file_url())
}

fn fallback_file_url() -> Url {
    Url::parse("file:///").unwrap()
}
