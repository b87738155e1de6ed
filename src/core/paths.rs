//! Path normalization utilities
//!
//! Origin paths are recorded relative to a module's `pages/` or `partials/`
//! directory and always use '/' as separator.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to a base directory
pub fn make_relative(path: &Path, base: &Path) -> Option<String> {
    path.strip_prefix(base).ok().map(normalize_path)
}

/// Join '/'-separated relative segments onto a base directory
pub fn join_normalized(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(base.to_path_buf(), |acc, segment| acc.join(segment))
}

/// Check whether a file carries the given extension (case-insensitive, without dot)
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
