//! Deduplicated warnings routed through the `log` facade.
//!
//! Layout never fails on bad input; it substitutes a safe default and
//! reports what it ignored here. Each distinct message is logged once per
//! process (or until [`clear_warnings`] is called) so a paint loop that
//! repeatedly meets the same unknown font does not flood the log.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already logged (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about ignored or unsupported input (logs once per unique message).
///
/// Returns `true` if this call actually emitted the warning.
///
/// # Example
/// ```
/// use inkbox_common::warning::warn_once;
///
/// let _ = warn_once("Style", "unknown white-space keyword 'pre-line-ish'");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: "inkbox", "[{component}] {message}");
    }
    should_log
}

/// Returns `true` if the given warning has been recorded since the last clear.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call when rendering new content).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates() {
        let message = "dedup probe 7f3a";
        assert!(warn_once("Test", message));
        assert!(!warn_once("Test", message));
        assert!(has_warned("Test", message));
    }

    #[test]
    fn test_components_are_distinct_keys() {
        assert!(warn_once("TestA", "shared text 91c2"));
        assert!(warn_once("TestB", "shared text 91c2"));
    }
}
