//! Platform-specific path normalization.
//!
//! Windows drive letters are the one place resolved-URL equality depends on
//! the target platform: `c:/pkg/x.html` and `C:/pkg/x.html` name the same
//! file, so the drive prefix is case-normalized to uppercase before a path
//! becomes part of a canonical URL. The normalization is a pure function
//! parameterized by [`Platform`], so both behaviors stay testable on any
//! host.

use std::borrow::Cow;

/// Target platform for filesystem-path interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Forward-slash paths, no drive letters.
    Posix,
    /// Drive-letter prefixes, case-insensitive.
    Windows,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }
}

/// Convert a decoded URL pathname into a filesystem-comparison path.
///
/// On Windows, `/c:/pkg/x.html` becomes `C:/pkg/x.html`: the leading
/// separator before the drive is dropped and the drive letter is
/// uppercased. On posix the pathname is already the filesystem path.
pub fn fs_path_for_pathname(pathname: &str, platform: Platform) -> Cow<'_, str> {
    if platform == Platform::Windows {
        let stripped = pathname.strip_prefix('/').unwrap_or(pathname);
        if has_drive_prefix(stripped) {
            let mut path = String::with_capacity(stripped.len());
            path.push(stripped.as_bytes()[0].to_ascii_uppercase() as char);
            path.push_str(&stripped[1..]);
            return Cow::Owned(path);
        }
    }
    Cow::Borrowed(pathname)
}

/// Convert a filesystem-comparison path back into a URL pathname
/// (leading separator restored before a drive prefix).
pub fn pathname_for_fs_path(path: &str, platform: Platform) -> Cow<'_, str> {
    if platform == Platform::Windows && has_drive_prefix(path) {
        return Cow::Owned(format!("/{}", path));
    }
    Cow::Borrowed(path)
}

pub(crate) fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
