//! Syntactic path resolution against the directory state.
//!
//! Nothing here touches the filesystem: existence is checked by whichever
//! operation consumes the resolved path.

use std::path::Path;

/// Resolve `path` against the current directory `state`.
///
/// - `.` and `./` yield `state` unchanged
/// - `..` yields [`parent`] of `state`
/// - absolute paths are returned as-is
/// - anything else is joined onto `state`
pub fn resolve(state: &str, path: &str) -> String {
    match path {
        "." | "./" => state.to_string(),
        ".." => parent(state),
        _ if Path::new(path).is_absolute() => path.to_string(),
        _ => Path::new(state).join(path).to_string_lossy().into_owned(),
    }
}

/// Drop the last component of `state`.
///
/// Truncation is purely textual, so symlinks are not followed and a `..`
/// already inside `state` is kept. The root is its own parent. A single
/// relative component yields `.`, and `.` (or an empty state) yields `..`.
pub fn parent(state: &str) -> String {
    let trimmed = state.trim_end_matches('/');
    if trimmed.is_empty() {
        return if state.is_empty() {
            "..".to_string()
        } else {
            "/".to_string()
        };
    }
    if trimmed == "." {
        return "..".to_string();
    }
    match Path::new(trimmed).parent() {
        Some(p) if p.as_os_str().is_empty() => ".".to_string(),
        Some(p) => p.to_string_lossy().into_owned(),
        None => "/".to_string(),
    }
}
