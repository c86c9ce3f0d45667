/// Pattern parsing for route segments
///
/// Pure functional parsing of string route patterns into typed segments.
/// All functions are **pure**: same input → same output, no side effects.
use crate::error::{Result, RouterError};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A single segment of a string route pattern
///
/// # Examples
///
/// ```
/// use wayfinder_router::route::pattern::{classify_segment, Segment};
///
/// assert_eq!(classify_segment("users"), Segment::Literal("users".to_string()));
/// assert_eq!(classify_segment(":id"), Segment::Param("id".to_string()));
/// assert_eq!(classify_segment("*"), Segment::Wildcard);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text compared against the path segment (case-insensitive by default)
    Literal(String),
    /// `:name` capture, bound to the raw path segment
    Param(String),
    /// `*`, matches whatever trails
    Wildcard,
}

/// Classifies one pattern segment (pure function)
///
/// Only an exact `*` is a wildcard; `*foo` and `a*` are literals.
pub fn classify_segment(segment: &str) -> Segment {
    if segment == "*" {
        return Segment::Wildcard;
    }

    match segment.strip_prefix(':') {
        Some(name) => Segment::Param(name.to_string()),
        None => Segment::Literal(segment.to_string()),
    }
}

/// A route pattern: either slash-separated segments or a regular expression
#[derive(Debug, Clone)]
pub enum RoutePattern {
    Segmented(Vec<Segment>),
    Regex(Regex),
}

impl RoutePattern {
    /// Parses a string pattern such as `/users/:id` or `/files/*`
    ///
    /// Splitting is literal: `/users/:id` becomes `["", "users", ":id"]`, so
    /// the leading empty segment lines up with the leading slash of the path.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] for an empty pattern, an empty
    /// or repeated parameter name, or segments after a wildcard.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder_router::route::pattern::{RoutePattern, Segment};
    ///
    /// let pattern = RoutePattern::parse("/users/:id").unwrap();
    /// assert_eq!(
    ///     pattern.segments().unwrap(),
    ///     &[
    ///         Segment::Literal(String::new()),
    ///         Segment::Literal("users".to_string()),
    ///         Segment::Param("id".to_string()),
    ///     ]
    /// );
    ///
    /// assert!(RoutePattern::parse("/users/:").is_err());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(RouterError::invalid_pattern(pattern, "pattern is empty"));
        }

        let segments: Vec<Segment> = pattern.split('/').map(classify_segment).collect();

        let mut seen = HashSet::new();
        for (idx, segment) in segments.iter().enumerate() {
            match segment {
                Segment::Param(name) if name.is_empty() => {
                    return Err(RouterError::invalid_pattern(
                        pattern,
                        format!("segment {} has an empty parameter name", idx),
                    ));
                }
                Segment::Param(name) if !seen.insert(name.as_str()) => {
                    return Err(RouterError::invalid_pattern(
                        pattern,
                        format!("parameter `{}` is declared twice", name),
                    ));
                }
                Segment::Wildcard if idx + 1 != segments.len() => {
                    return Err(RouterError::invalid_pattern(
                        pattern,
                        "wildcard must be the last segment",
                    ));
                }
                _ => {}
            }
        }

        Ok(RoutePattern::Segmented(segments))
    }

    /// Segments of a string pattern, `None` for regex patterns
    pub fn segments(&self) -> Option<&[Segment]> {
        match self {
            RoutePattern::Segmented(segments) => Some(segments),
            RoutePattern::Regex(_) => None,
        }
    }

    /// Whether the pattern ends in a wildcard
    pub fn has_wildcard(&self) -> bool {
        matches!(
            self.segments().and_then(|s| s.last()),
            Some(Segment::Wildcard)
        )
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> Vec<&str> {
        self.segments()
            .unwrap_or_default()
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl FromStr for RoutePattern {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self> {
        RoutePattern::parse(s)
    }
}

impl From<Regex> for RoutePattern {
    fn from(regex: Regex) -> Self {
        RoutePattern::Regex(regex)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Segmented(segments) => {
                let joined = segments
                    .iter()
                    .map(|segment| match segment {
                        Segment::Literal(text) => text.clone(),
                        Segment::Param(name) => format!(":{}", name),
                        Segment::Wildcard => "*".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("/");
                f.write_str(&joined)
            }
            RoutePattern::Regex(regex) => write!(f, "regex({})", regex.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_classify_literal() {
        assert_eq!(classify_segment("about"), Segment::Literal("about".to_string()));
        assert_eq!(classify_segment(""), Segment::Literal(String::new()));
    }

    #[test]
    fn test_classify_param() {
        assert_eq!(classify_segment(":id"), Segment::Param("id".to_string()));
    }

    #[test]
    fn test_classify_wildcard_only_exact_star() {
        assert_eq!(classify_segment("*"), Segment::Wildcard);
        assert_eq!(classify_segment("*slug"), Segment::Literal("*slug".to_string()));
    }

    #[test]
    fn test_parse_wildcard_pattern() {
        let pattern = RoutePattern::parse("/files/*").unwrap();
        assert!(pattern.has_wildcard());
        assert_eq!(pattern.segments().unwrap().len(), 3);
    }

    #[test]
    fn test_param_names_in_order() {
        let pattern = RoutePattern::parse("/posts/:year/:slug").unwrap();
        assert_eq!(pattern.param_names(), vec!["year", "slug"]);
    }

    #[rstest]
    #[case("")]
    #[case("/users/:")]
    #[case("/a/:id/:id")]
    #[case("/a/*/b")]
    fn test_parse_rejects_malformed(#[case] pattern: &str) {
        let err = RoutePattern::parse(pattern).unwrap_err();
        assert!(matches!(err, RouterError::InvalidPattern { .. }));
    }

    #[test]
    fn test_display_round_trips_source() {
        let pattern: RoutePattern = "/users/:id/*".parse().unwrap();
        assert_eq!(pattern.to_string(), "/users/:id/*");
    }
}
