//! Request path normalization
//!
//! Turns a raw URI path into a relative filesystem path that cannot climb
//! above the directory it is joined to.

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

/// Normalize a request path into a relative path
///
/// The path is percent-decoded, then split on `/`. Empty and `.` segments are
/// dropped and `..` removes the previous segment, stopping at the root.
///
/// Returns `None` when the path is not valid UTF-8 after decoding or contains
/// a segment that is not a plain file name (backslashes, NUL bytes, drive
/// prefixes).
///
/// # Examples
/// ```
/// use server_static::http::path::normalize;
/// use std::path::PathBuf;
/// assert_eq!(normalize("/sub/./page.html"), Some(PathBuf::from("sub/page.html")));
/// assert_eq!(normalize("/../../etc/passwd"), Some(PathBuf::from("etc/passwd")));
/// assert_eq!(normalize("/"), Some(PathBuf::new()));
/// ```
pub fn normalize(request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name if is_plain_name(name) => segments.push(name),
            _ => return None,
        }
    }

    Some(segments.iter().collect())
}

/// Check that a segment is exactly one normal path component
fn is_plain_name(segment: &str) -> bool {
    if segment.contains(['\\', '\0']) {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
