//! Environment variable utilities
//!
//! Provides helpers for reading environment variables and search-path lists.

use std::path::PathBuf;

/// Get environment variable as Option
///
/// Returns `Some(value)` if set and non-empty, `None` otherwise.
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Split a search-path list into directories
///
/// Empty entries are dropped and one trailing `/` or `\` is trimmed from each
/// entry. A lone separator such as `/` is kept as is.
///
/// # Example
/// ```rust
/// use depwalk::utils::split_search_path;
/// use std::path::PathBuf;
///
/// let dirs = split_search_path("C:\\bin\\;;D:\\lib", ';');
/// assert_eq!(dirs, vec![PathBuf::from("C:\\bin"), PathBuf::from("D:\\lib")]);
/// ```
pub fn split_search_path(value: &str, separator: char) -> Vec<PathBuf> {
    value
        .split(separator)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let trimmed = match entry.strip_suffix(|c: char| c == '/' || c == '\\') {
                Some(rest) if !rest.is_empty() => rest,
                _ => entry,
            };
            PathBuf::from(trimmed)
        })
        .collect()
}
