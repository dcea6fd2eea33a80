//! Core address-space types shared by every resolver variant.

mod link;
mod url;

pub use link::LinkKind;
pub use url::{FileRelativeUrl, PackageRelativeUrl, ResolvedUrl};
