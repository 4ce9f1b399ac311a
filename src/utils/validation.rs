//! Centralized validation and helper functions.

/// Maximum number of hits accepted from a single document (resource protection)
pub const MAX_HITS: usize = 100_000;

/// Check if adding another hit would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new hit.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_hit_limit(count: usize) -> Option<String> {
    if count >= MAX_HITS {
        Some(format!(
            "Too many hits: adding another would exceed maximum of {MAX_HITS}"
        ))
    } else {
        None
    }
}

/// Reduce an untrusted string to a filename-safe component.
///
/// Keeps ASCII alphanumerics plus `.`, `-`, and `_`; everything else is
/// dropped. An input with nothing safe left becomes `"unknown"` so callers
/// always get a usable component.
#[must_use]
pub fn sanitize_component(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();

    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}
