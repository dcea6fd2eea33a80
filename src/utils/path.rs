//! Posix-style path utilities.
//!
//! Resolved URLs are compared and rewritten as decoded, forward-slash
//! separated strings. These helpers implement the path algebra those
//! comparisons need:
//! - Link type detection (external vs internal)
//! - `.`/`..` normalization
//! - Relative-path computation between absolute paths
//! - Segment-aware prefix checks

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// # Examples
/// ```
/// use docspace::utils::path::is_external_link;
/// assert!(is_external_link("https://example.com"));
/// assert!(is_external_link("mailto:user@example.com"));
/// assert!(!is_external_link("/about"));
/// assert!(!is_external_link("./file.txt"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Strip query string and fragment from a reference.
///
/// # Examples
/// ```
/// use docspace::utils::path::strip_query_fragment;
/// assert_eq!(strip_query_fragment("/about?v=1#team"), "/about");
/// assert_eq!(strip_query_fragment("/about"), "/about");
/// ```
#[inline]
pub fn strip_query_fragment(reference: &str) -> &str {
    reference.split(['?', '#']).next().unwrap_or(reference)
}

/// Normalize a posix path: collapse `.`, `..` and repeated separators.
///
/// Absolute paths never ascend above `/`; excess `..` segments are
/// discarded. Relative paths keep leading `..` segments.
///
/// # Examples
/// ```
/// use docspace::utils::path::normalize_posix;
/// assert_eq!(normalize_posix("/root/pkg/../sibling/x.html"), "/root/sibling/x.html");
/// assert_eq!(normalize_posix("/a/./b//c"), "/a/b/c");
/// assert_eq!(normalize_posix("../../x"), "../../x");
/// assert_eq!(normalize_posix("/../../x"), "/x");
/// ```
pub fn normalize_posix(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(part),
        }
    }

    match (absolute, segments.is_empty()) {
        (true, true) => "/".to_string(),
        (true, false) => format!("/{}", segments.join("/")),
        (false, true) => ".".to_string(),
        (false, false) => segments.join("/"),
    }
}

/// Join two posix paths and normalize the result.
///
/// A leading separator on `tail` does not reset to the filesystem root;
/// the tail is always appended onto `base`.
pub fn join_posix(base: &str, tail: &str) -> String {
    let base = base.trim_end_matches('/');
    let tail = tail.trim_start_matches('/');
    if tail.is_empty() {
        normalize_posix(base)
    } else {
        normalize_posix(&format!("{}/{}", base, tail))
    }
}

/// Compute the relative path from one absolute posix path to another.
///
/// Both arguments are treated as already-normalized absolute paths;
/// `from` is a directory.
///
/// # Examples
/// ```
/// use docspace::utils::path::relative_posix;
/// assert_eq!(relative_posix("/root", "/root/sub/x"), "sub/x");
/// assert_eq!(relative_posix("/root/a", "/root/b/x"), "../b/x");
/// ```
pub fn relative_posix(from: &str, to: &str) -> String {
    let from_parts: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_parts: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<&str> = Vec::new();
    for _ in common..from_parts.len() {
        segments.push("..");
    }
    segments.extend(&to_parts[common..]);

    if segments.is_empty() {
        ".".to_string()
    } else {
        segments.join("/")
    }
}

/// Get the parent directory of a posix path.
///
/// `/root/pkg` -> `/root`, `/x` -> `/`
pub fn dirname_posix(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    }
}

/// Segment-aware prefix check: is `path` equal to `dir` or inside it?
///
/// Unlike a plain `starts_with`, `/root/pkgother` is not within `/root/pkg`.
pub fn is_within(path: &str, dir: &str) -> bool {
    let dir = dir.trim_end_matches('/');
    path == dir || path.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/'))
}
