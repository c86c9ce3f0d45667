//! Path splitting and cleanup applied before route matching

use std::borrow::Cow;

/// Splits a path on `/` without dropping empty segments
///
/// `/users/42` yields `["", "users", "42"]`; a trailing slash yields a
/// trailing empty segment. Route patterns are split the same way, so the two
/// line up index by index.
///
/// # Examples
///
/// ```
/// use wayfinder_router::path::split_segments;
///
/// assert_eq!(split_segments("/users/42"), vec!["", "users", "42"]);
/// assert_eq!(split_segments("/users/"), vec!["", "users", ""]);
/// ```
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

/// Whether a path should be replaced by the default route
///
/// ```
/// use wayfinder_router::path::is_root_or_empty;
///
/// assert!(is_root_or_empty(""));
/// assert!(is_root_or_empty("/"));
/// assert!(!is_root_or_empty("/home"));
/// ```
pub fn is_root_or_empty(path: &str) -> bool {
    path.is_empty() || path == "/"
}

/// Drops the `?query` and `#fragment` parts of a URL path
///
/// ```
/// use wayfinder_router::path::strip_query_and_fragment;
///
/// assert_eq!(strip_query_and_fragment("/search?q=rust#top"), "/search");
/// assert_eq!(strip_query_and_fragment("/plain"), "/plain");
/// ```
pub fn strip_query_and_fragment(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |idx| &path[..idx])
}

/// Whether `normalize_path` would leave `path` untouched
///
/// A normalized path is `/` or a `/`-led run of non-empty segments with no
/// backslashes.
///
/// ```
/// use wayfinder_router::path::is_normalized;
///
/// assert!(is_normalized("/"));
/// assert!(is_normalized("/users/42"));
/// assert!(!is_normalized(""));
/// assert!(!is_normalized("users"));
/// assert!(!is_normalized("/users/"));
/// assert!(!is_normalized("/users//42"));
/// ```
pub fn is_normalized(path: &str) -> bool {
    match path.strip_prefix('/') {
        Some("") => true,
        Some(rest) => !rest.contains('\\') && rest.split('/').all(|segment| !segment.is_empty()),
        None => false,
    }
}

/// Rewrites a path before matching when `normalize_paths` is on
///
/// Backslashes become slashes, empty segments are dropped and a leading
/// slash is added, so `users//42/` and `\users\42` both match `/users/:id`.
/// Already normalized input is returned borrowed.
///
/// ```
/// use std::borrow::Cow;
/// use wayfinder_router::path::normalize_path;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("/about/"), "/about");
/// assert_eq!(normalize_path("\\users\\123"), "/users/123");
/// assert_eq!(normalize_path("/path//to///page"), "/path/to/page");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_normalized(path) {
        return Cow::Borrowed(path);
    }

    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in path.split(['/', '\\']).filter(|s| !s.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(normalized)
    }
}
