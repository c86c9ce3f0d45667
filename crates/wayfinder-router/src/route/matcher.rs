/// Matching algorithms, one per [`RoutePattern`] variant
///
/// [`RoutePattern`]: crate::route::pattern::RoutePattern
use super::pattern::Segment;
use super::RouteParams;
use regex::Regex;

/// Case-aware comparison of a literal against a path segment that may be absent
///
/// An absent segment never equals a literal, not even an empty one.
///
/// # Examples
///
/// ```
/// use wayfinder_router::route::matcher::literal_eq;
///
/// assert!(literal_eq("Home", Some("home"), true));
/// assert!(!literal_eq("Home", Some("home"), false));
/// assert!(!literal_eq("", None, true));
/// ```
pub fn literal_eq(literal: &str, segment: Option<&str>, case_insensitive: bool) -> bool {
    let Some(segment) = segment else {
        return false;
    };

    if !case_insensitive {
        return literal == segment;
    }

    // ASCII fast path, full Unicode lowercasing otherwise
    if literal.is_ascii() && segment.is_ascii() {
        literal.eq_ignore_ascii_case(segment)
    } else {
        literal.to_lowercase() == segment.to_lowercase()
    }
}

/// Matches pattern segments against path segments
///
/// Rules, walked left to right:
/// - `Wildcard` accepts everything that trails, including nothing.
/// - `Param` binds the raw path segment; the segment must exist.
/// - `Literal` must equal the path segment.
/// - Without a wildcard the segment counts must be equal.
///
/// # Examples
///
/// ```
/// use wayfinder_router::route::matcher::match_segments;
/// use wayfinder_router::route::pattern::RoutePattern;
///
/// let pattern = RoutePattern::parse("/users/:id").unwrap();
/// let segments = pattern.segments().unwrap();
///
/// let params = match_segments(segments, &["", "users", "42"], true).unwrap();
/// assert_eq!(params.get("id"), Some("42"));
///
/// assert!(match_segments(segments, &["", "users"], true).is_none());
/// ```
pub fn match_segments(
    pattern: &[Segment],
    path: &[&str],
    case_insensitive: bool,
) -> Option<RouteParams> {
    // Tail-recursive walk over both segment lists
    fn walk(
        pattern: &[Segment],
        path: &[&str],
        idx: usize,
        mut params: RouteParams,
        case_insensitive: bool,
    ) -> Option<RouteParams> {
        let Some(segment) = pattern.get(idx) else {
            return if idx == path.len() { Some(params) } else { None };
        };

        match segment {
            Segment::Wildcard => Some(params),
            Segment::Param(name) => {
                let value = path.get(idx)?;
                params.insert(name.clone(), (*value).to_string());
                walk(pattern, path, idx + 1, params, case_insensitive)
            }
            Segment::Literal(text) => {
                if literal_eq(text, path.get(idx).copied(), case_insensitive) {
                    walk(pattern, path, idx + 1, params, case_insensitive)
                } else {
                    None
                }
            }
        }
    }

    walk(pattern, path, 0, RouteParams::default(), case_insensitive)
}

/// Matches a regex route against a path
///
/// The regex sees the path without its leading slash. A match binds `hash` to
/// the slash-split remainder.
///
/// # Examples
///
/// ```
/// use regex::Regex;
/// use wayfinder_router::route::matcher::match_regex;
///
/// let regex = Regex::new(r"^docs/").unwrap();
/// let params = match_regex(&regex, "/docs/intro/setup").unwrap();
/// assert_eq!(params.hash(), Some(&["docs", "intro", "setup"].map(String::from)[..]));
/// ```
pub fn match_regex(regex: &Regex, path: &str) -> Option<RouteParams> {
    let stripped = path.strip_prefix('/').unwrap_or(path);
    if !regex.is_match(stripped) {
        return None;
    }

    let hash = stripped.split('/').map(str::to_string).collect();
    Some(RouteParams::with_hash(hash))
}
