//! Navigation state machine types
//!
//! A call to [`Router::navigate`] moves through
//!
//! ```text
//! Matching ──match──▶ Done
//!    │
//!    └─no match─▶ NoMatch ──policy──▶ Redirecting ──▶ Matching (depth + 1)
//!                    │
//!                    └────────────────▶ Done
//! ```
//!
//! and is bounded by [`MAX_REDIRECT_DEPTH`].
//!
//! [`Router::navigate`]: crate::Router::navigate

use serde::{Deserialize, Serialize};

/// Number of fallback redirects a single navigation may perform
pub const MAX_REDIRECT_DEPTH: usize = 1;

/// What to do when no route matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoMatchPolicy {
    /// Push the default route and dispatch it
    #[default]
    Redirect,
    /// Stop without touching history
    Ignore,
    /// Return [`RouterError::NoMatch`](crate::RouterError::NoMatch)
    Error,
}

/// Internal states of one navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NavState {
    Matching { path: String, depth: usize },
    NoMatch { path: String, depth: usize },
    Redirecting { from: String, to: String, depth: usize },
    Done(Navigation),
}

/// Result of a completed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path as passed to `navigate`
    pub requested: String,
    /// Path that was finally dispatched, after default substitution and redirects
    pub resolved: String,
    /// Index of the route whose handler ran, in registration order
    pub matched: Option<usize>,
    /// Whether the no-match fallback redirected to the default route
    pub redirected: bool,
}

impl Navigation {
    pub fn is_matched(&self) -> bool {
        self.matched.is_some()
    }
}

/// Outcome of feeding a [`NavigationEvent`](crate::NavigationEvent) to the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The router handled the event and dispatched a path
    Navigated(Navigation),
    /// The link leaves the application; let the browser follow it
    PassThrough,
}
