//! Graceful degradation for per-item failures
//!
//! A failed filesystem query on one module must not abort a whole resolution
//! or report. These helpers log the failure and hand back a substitute.

use tracing::warn;

/// Run `primary`; on error log `context` and return `fallback()` instead
///
/// # Example
/// ```rust
/// use depwalk::utils::with_fallback;
///
/// let value = with_fallback(
///     || "42".parse::<u32>(),
///     || 0,
///     "Parse failed, using fallback",
/// );
/// assert_eq!(value, 42);
/// ```
pub fn with_fallback<F1, F2, T, E>(primary: F1, fallback: F2, context: &str) -> T
where
    F1: FnOnce() -> Result<T, E>,
    F2: FnOnce() -> T,
    E: std::fmt::Display,
{
    primary().unwrap_or_else(|e| {
        warn!("{}: {}", context, e);
        fallback()
    })
}

/// `Some` on success; on error log `context` and return `None`
pub fn result_to_option<T, E>(result: Result<T, E>, context: &str) -> Option<T>
where
    E: std::fmt::Display,
{
    result
        .map_err(|e| warn!("{}: {}", context, e))
        .ok()
}
