//! Lookup patterns for role search
//!
//! Two pattern types:
//! 1. Glob: any pattern containing `*` or `?`, matched against the whole value
//! 2. Substring: everything else, matched anywhere in the value
//!
//! Matching is case-sensitive. The empty pattern matches everything.

use wildmatch::WildMatch;

/// Checks if `value` matches a lookup `pattern`
///
/// # Examples
///
/// ```rust
/// use authz_roles::store::matches_pattern;
///
/// // Substring
/// assert!(matches_pattern("billing:admin", "admin"));
///
/// // Glob
/// assert!(matches_pattern("billing:admin", "billing:*"));
/// assert!(!matches_pattern("billing:admin", "*:viewer"));
/// assert!(matches_pattern("team-7", "team-?"));
/// ```
pub fn matches_pattern(value: &str, pattern: &str) -> bool {
    if is_glob(pattern) {
        return WildMatch::new(pattern).matches(value);
    }

    value.contains(pattern)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}
