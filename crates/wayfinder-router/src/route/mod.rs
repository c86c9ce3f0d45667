/// Route entries and captured parameters
pub mod matcher;
pub mod pattern;

use pattern::RoutePattern;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Parameters captured by a successful match
///
/// String routes fill the key/value map from `:name` segments. Regex routes
/// leave the map empty and set [`hash`](RouteParams::hash) instead.
///
/// Serializes as a flat object (`{"id": "42"}` or `{"hash": [...]}`), so it
/// can be passed straight to a template renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteParams {
    #[serde(flatten)]
    values: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<Vec<String>>,
}

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_hash(hash: Vec<String>) -> Self {
        Self {
            values: HashMap::new(),
            hash: Some(hash),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value bound to a `:name` segment
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Slash-split path segments, set only by regex routes
    pub fn hash(&self) -> Option<&[String]> {
        self.hash.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.hash.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let values = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { values, hash: None }
    }
}

/// Application callback run when its route matches
pub type Handler = Box<dyn Fn(&RouteParams)>;

/// A registered route: pattern plus handler
pub struct Route {
    pattern: RoutePattern,
    handler: Handler,
}

impl Route {
    pub fn new(pattern: RoutePattern, handler: impl Fn(&RouteParams) + 'static) -> Self {
        Self {
            pattern,
            handler: Box::new(handler),
        }
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Matches this route against pre-split path segments
    ///
    /// `path` is the full path (used by regex routes), `segments` its
    /// slash-split form (used by string routes).
    pub fn matches(
        &self,
        path: &str,
        segments: &[&str],
        case_insensitive: bool,
    ) -> Option<RouteParams> {
        match &self.pattern {
            RoutePattern::Segmented(pattern) => {
                matcher::match_segments(pattern, segments, case_insensitive)
            }
            RoutePattern::Regex(regex) => matcher::match_regex(regex, path),
        }
    }

    pub(crate) fn invoke(&self, params: &RouteParams) {
        (self.handler)(params)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.to_string())
            .finish_non_exhaustive()
    }
}
