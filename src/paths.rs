//! Path Helpers
//!
//! Route comparison for menu links and navigation targets.

use percent_encoding::percent_decode_str;

/// Absolute in-app path (`/x`, never protocol-relative `//host`)
pub fn is_in_app(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

/// Canonical form of an href or `location.pathname` for comparison
///
/// Drops query and fragment, a trailing slash and percent-encoding.
/// Same-origin absolute URLs are reduced to their path; anything else that is
/// not an in-app path yields `None`.
pub fn normalize(href: &str, origin: &str) -> Option<String> {
    let href = href.trim();
    let path = match href.strip_prefix(origin) {
        Some(rest) if !origin.is_empty() && (rest.is_empty() || rest.starts_with(['/', '?', '#'])) => rest,
        _ => href,
    };
    let path = if path.is_empty() || path.starts_with(['?', '#']) {
        // Same-origin URL without a path component points at the root
        if path.len() == href.len() {
            return None;
        }
        "/"
    } else {
        path
    };
    if !is_in_app(path) {
        return None;
    }
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let decoded = percent_decode_str(&path[..end]).decode_utf8_lossy();
    let trimmed = decoded.trim_end_matches('/');
    Some(if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://inn.example";

    #[test]
    fn in_app_detection() {
        assert!(is_in_app("/admin/dashboard"));
        assert!(!is_in_app("//cdn.example/lib.js"));
        assert!(!is_in_app("#ui-basic"));
        assert!(!is_in_app("https://elsewhere.example/"));
    }

    #[test]
    fn normalizes_trailing_slash_query_and_fragment() {
        assert_eq!(normalize("/admin/reservations/new/", ORIGIN).as_deref(), Some("/admin/reservations/new"));
        assert_eq!(normalize("/admin/users?page=2#top", ORIGIN).as_deref(), Some("/admin/users"));
        assert_eq!(normalize("/", ORIGIN).as_deref(), Some("/"));
    }

    #[test]
    fn same_origin_urls_reduce_to_path() {
        assert_eq!(normalize("https://inn.example/admin/", ORIGIN).as_deref(), Some("/admin"));
        assert_eq!(normalize("https://inn.example", ORIGIN).as_deref(), Some("/"));
        assert_eq!(normalize("https://inn.example.evil/admin", ORIGIN), None);
        assert_eq!(normalize("https://other.example/admin", ORIGIN), None);
    }

    #[test]
    fn toggles_and_fragments_are_not_routes() {
        assert_eq!(normalize("#ui-basic", ORIGIN), None);
        assert_eq!(normalize("", ORIGIN), None);
    }

    #[test]
    fn percent_encoding_is_ignored() {
        assert_eq!(
            normalize("/rooms/suite%20royale", ORIGIN),
            normalize("/rooms/suite royale", ORIGIN)
        );
    }
}
