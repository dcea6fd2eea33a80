//! Resolver configuration loading.
//!
//! A config file names the directories references are interpreted against
//! and, optionally, the indirection table for codebases whose storage
//! layout diverges from their URL space:
//!
//! ```toml
//! [package]
//! root = "/root/pkg"
//! component_dir = "components"
//!
//! [indirection]
//! source_root = "/root"
//! package_root = "/root/sub/package"
//!
//! [[indirection.mapping]]
//! url = "/components/foo/foo.html"
//! path = "sub/package/foo/foo.html"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::resolver::{IndirectUrlResolver, IndirectionTable, PackageUrlResolver, ResolverChain};

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    Validation(String),
}

// ============================================================================
// ResolverConfig
// ============================================================================

/// Top-level resolver configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Convention-based resolution rooted at a package directory
    #[serde(default)]
    pub package: Option<PackageSection>,
    /// Table-based resolution through an indirection map
    #[serde(default)]
    pub indirection: Option<IndirectionSection>,
}

/// `[package]` section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSection {
    /// Package root directory
    pub root: PathBuf,
    /// Dependency directory name (default: components)
    #[serde(default)]
    pub component_dir: Option<String>,
    /// Hostname treated as local
    #[serde(default)]
    pub hostname: Option<String>,
}

/// `[indirection]` section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndirectionSection {
    /// Boundary outside which no document may be addressed
    pub source_root: String,
    /// Directory entry-point references are interpreted against
    pub package_root: String,
    /// Ordered (url, path) pairs; storage paths are source_root-relative
    #[serde(default)]
    pub mapping: IndirectionTable,
}

impl ResolverConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.package.is_none() && self.indirection.is_none() {
            return Err(ConfigError::Validation(
                "at least one of [package] or [indirection] must be configured".to_string(),
            ));
        }
        if let Some(indirection) = &self.indirection {
            if indirection.mapping.is_empty() {
                return Err(ConfigError::Validation(
                    "[indirection] requires at least one [[indirection.mapping]] entry"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Build the delegation chain.
    ///
    /// The indirection resolver goes first when both sections are present:
    /// it only claims scheme-less references, and its table is the more
    /// specific knowledge.
    pub fn into_chain(self) -> ResolverChain {
        let mut chain = ResolverChain::default();
        if let Some(indirection) = self.indirection {
            chain.push(IndirectUrlResolver::new(
                indirection.source_root,
                indirection.package_root,
                indirection.mapping,
            ));
        }
        if let Some(package) = self.package {
            let mut resolver = PackageUrlResolver::new(&package.root);
            if let Some(dir) = package.component_dir {
                resolver = resolver.with_component_dir(dir);
            }
            if let Some(hostname) = package.hostname {
                resolver = resolver.with_hostname(hostname);
            }
            chain.push(resolver);
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PackageRelativeUrl;
    use crate::resolver::UrlResolver;
    use std::io::Write;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_indirection_config() {
        let file = write_config(
            r#"
[indirection]
source_root = "/root"
package_root = "/root/sub/package"

[[indirection.mapping]]
url = "/components/foo/foo.html"
path = "sub/package/foo/foo.html"

[[indirection.mapping]]
url = "/components/bar/bar.html"
path = "different/x/y/bar.html"
"#,
        );
        let config = ResolverConfig::load(file.path()).unwrap();
        let indirection = config.indirection.as_ref().unwrap();
        assert_eq!(indirection.mapping.len(), 2);

        let chain = config.into_chain();
        let resolved = chain
            .resolve(&PackageRelativeUrl::new("foo/foo.html"))
            .unwrap();
        assert_eq!(resolved, "sub/package/foo/foo.html");
    }

    #[test]
    fn test_load_package_config() {
        let file = write_config(
            r#"
[package]
root = "/root/pkg"
component_dir = "vendor"
"#,
        );
        let chain = ResolverConfig::load(file.path()).unwrap().into_chain();
        let resolved = chain
            .resolve(&PackageRelativeUrl::new("../sibling/x.html"))
            .unwrap();
        assert_eq!(resolved, "file:///root/pkg/vendor/sibling/x.html");
    }

    #[test]
    fn test_empty_config_rejected() {
        let file = write_config("");
        let err = ResolverConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_mapping_rejected() {
        let file = write_config(
            r#"
[indirection]
source_root = "/root"
package_root = "/root"
"#,
        );
        let err = ResolverConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let file = write_config(
            r#"
[package]
root = "/root/pkg"
compnent_dir = "vendor"
"#,
        );
        let err = ResolverConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ResolverConfig::load(Path::new("/nonexistent/docspace.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }
}
