//! Request-path to filename sanitization
//!
//! Turns an arbitrary request path into a deterministic, filesystem-safe
//! identity string used as the cache file name.

/// Characters that are replaced with `_` because they are unsafe or
/// meaningful on common filesystems.
const UNSAFE_CHARS: &[char] = &['/', '*', '?', ':', '"', '<', '>', '|', '\\'];

/// Sanitizes a request path into a filesystem-safe file identity.
///
/// Each unsafe character becomes a `_`, each run of whitespace collapses into
/// a single `_`, and leading `_` characters are stripped. The transformation
/// is deterministic and idempotent, so the same request path always maps to
/// the same cache file.
///
/// Note: the substitution is not collision-free. Two request paths that
/// differ only in a stripped leading character map to the same identity.
///
/// # Examples
/// ```
/// use fetchcache::cache::sanitize;
///
/// assert_eq!(sanitize("/photos/1?t=12"), "photos_1_t=12");
/// ```
pub fn sanitize(request_path: &str) -> String {
    let mut out = String::with_capacity(request_path.len());
    let mut in_whitespace = false;

    for ch in request_path.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
            if UNSAFE_CHARS.contains(&ch) {
                out.push('_');
            } else {
                out.push(ch);
            }
        }
    }

    out.trim_start_matches('_').to_string()
}
