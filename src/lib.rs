//! Docspace - address-space resolution for static analysis of interlinked
//! documents.
//!
//! When a tool statically analyzes a tree of documents that reference each
//! other, the same document is named three different ways: the
//! package-relative reference a user types at the tool boundary, the
//! link-relative reference embedded in another document's markup, and the
//! canonical resolved URL the analysis keys its graph on. This crate owns
//! the translation between those three spaces.
//!
//! Two resolution strategies are provided:
//!
//! - [`resolver::PackageUrlResolver`] infers canonical URLs from filesystem
//!   layout plus a dependency-directory convention
//! - [`resolver::IndirectUrlResolver`] looks them up in an explicit
//!   bidirectional table for codebases whose virtual URL space and storage
//!   layout diverge arbitrarily
//!
//! ```
//! use docspace::resolver::{PackageUrlResolver, Platform, UrlResolver};
//! use docspace::PackageRelativeUrl;
//!
//! let resolver = PackageUrlResolver::new("/root/pkg").with_platform(Platform::Posix);
//! let resolved = resolver.resolve(&PackageRelativeUrl::new("../sibling/x.html")).unwrap();
//! assert_eq!(resolved, "file:///root/pkg/components/sibling/x.html");
//! ```

mod core;

pub mod config;
pub mod logger;
pub mod resolver;
pub mod utils;

pub use crate::core::{FileRelativeUrl, LinkKind, PackageRelativeUrl, ResolvedUrl};
