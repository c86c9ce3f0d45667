//! # Wayfinder Router
//!
//! Client-side routing for single-page applications:
//! - Literal segments (`/about`, compared case-insensitively)
//! - Parameters (`/users/:id`)
//! - Wildcards (`/files/*`)
//! - Regular-expression routes
//! - Fallback to a default route when nothing matches
//!
//! Routes are tried in registration order and the first match wins. The
//! router does not sort, deduplicate, or rank patterns; a later duplicate is
//! simply unreachable.
//!
//! Browser integration goes through the [`History`] trait, so the whole
//! dispatch path runs headless with [`MemoryHistory`].
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use wayfinder_router::{Router, RouterOptions};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let mut router = Router::new(RouterOptions::default());
//! let log = seen.clone();
//! router
//!     .route("/users/:id", move |params| {
//!         log.borrow_mut().push(params.get("id").unwrap_or_default().to_string());
//!     })
//!     .unwrap();
//!
//! let nav = router.navigate("/users/42").unwrap();
//! assert!(nav.is_matched());
//! assert_eq!(*seen.borrow(), vec!["42"]);
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod error;
pub mod history;
pub mod navigation;
pub mod path;
pub mod route;

pub use error::{Result, RouterError};
pub use history::{History, HistoryEntry, MemoryHistory, NavigationEvent, Origin};
pub use navigation::{EventOutcome, Navigation, NoMatchPolicy, MAX_REDIRECT_DEPTH};
pub use route::pattern::{RoutePattern, Segment};
pub use route::{Handler, Route, RouteParams};

use navigation::NavState;
use path::{is_root_or_empty, normalize_path, split_segments};
use regex::Regex;
use tracing::{debug, info, warn};

// ============================================================================
// Router Options
// ============================================================================

/// Router configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterOptions {
    /// Used for empty/root paths and as the no-match fallback
    pub default_route: String,
    /// What navigation does when nothing matches
    pub no_match: NoMatchPolicy,
    /// Compare literal segments case-insensitively (default: true)
    pub case_insensitive: bool,
    /// Normalize trailing/double slashes and backslashes before matching
    pub normalize_paths: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            default_route: "/".to_string(),
            no_match: NoMatchPolicy::Redirect,
            case_insensitive: true,
            normalize_paths: false,
        }
    }
}

impl RouterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_route(mut self, route: impl Into<String>) -> Self {
        self.default_route = route.into();
        self
    }

    pub fn with_no_match(mut self, policy: NoMatchPolicy) -> Self {
        self.no_match = policy;
        self
    }

    pub fn with_case_sensitivity(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_normalized_paths(mut self, normalize: bool) -> Self {
        self.normalize_paths = normalize;
        self
    }
}

// ============================================================================
// Router Implementation
// ============================================================================

type PathCallback = Box<dyn Fn(&str)>;

/// Ordered route table plus navigation dispatch
///
/// One router lives for the whole application session. It is single-threaded
/// by construction: handlers are plain `Fn` closures and history is owned.
pub struct Router {
    routes: Vec<Route>,
    options: RouterOptions,
    history: Option<Box<dyn History>>,
    on_navigate: Option<PathCallback>,
    not_found: Option<PathCallback>,
}

impl Router {
    /// Creates a router without a history; redirects only dispatch internally
    pub fn new(options: RouterOptions) -> Self {
        let mut options = options;
        if options.normalize_paths {
            options.default_route = normalize_path(&options.default_route).into_owned();
        }

        Self {
            routes: Vec::new(),
            options,
            history: None,
            on_navigate: None,
            not_found: None,
        }
    }

    /// Creates a router bound to a navigation source
    ///
    /// If the source reports an empty location, the default route is pushed
    /// so the visible URL is never blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder_router::{MemoryHistory, Router, RouterOptions};
    ///
    /// let history = MemoryHistory::new("");
    /// let _router = Router::with_history(
    ///     RouterOptions::default().with_default_route("/home"),
    ///     history.clone(),
    /// );
    /// assert_eq!(history.entries()[0].url, "/home");
    /// ```
    pub fn with_history(options: RouterOptions, history: impl History + 'static) -> Self {
        let mut router = Self::new(options);
        router.attach_history(history);
        router
    }

    /// Replaces the navigation source
    pub fn attach_history(&mut self, history: impl History + 'static) {
        let mut history: Box<dyn History> = Box::new(history);
        if history.current_path().is_empty() {
            let default = self.options.default_route.clone();
            history.push_state(&default, &default);
        }
        self.history = Some(history);
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub fn default_route(&self) -> &str {
        &self.options.default_route
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers a string pattern at the end of the route list
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] if the pattern cannot be parsed.
    pub fn route(
        &mut self,
        pattern: &str,
        handler: impl Fn(&RouteParams) + 'static,
    ) -> Result<&mut Self> {
        let parsed = RoutePattern::parse(pattern)?;
        Ok(self.add_route(Route::new(parsed, handler)))
    }

    /// Registers a regular-expression route at the end of the route list
    ///
    /// The regex is tested against the path without its leading slash.
    ///
    /// ```
    /// use regex::Regex;
    /// use wayfinder_router::{Router, RouterOptions};
    ///
    /// let mut router = Router::new(RouterOptions::default());
    /// router.route_regex(Regex::new(r"^docs/").unwrap(), |params| {
    ///     assert_eq!(params.hash().unwrap()[1], "setup");
    /// });
    /// assert!(router.navigate("/docs/setup").unwrap().is_matched());
    /// ```
    pub fn route_regex(
        &mut self,
        regex: Regex,
        handler: impl Fn(&RouteParams) + 'static,
    ) -> &mut Self {
        self.add_route(Route::new(RoutePattern::Regex(regex), handler))
    }

    pub fn add_route(&mut self, route: Route) -> &mut Self {
        debug!(pattern = %route.pattern(), position = self.routes.len(), "route registered");
        self.routes.push(route);
        self
    }

    /// Removes every route; options, observers and history are kept
    pub fn flush(&mut self) {
        debug!(removed = self.routes.len(), "routes flushed");
        self.routes.clear();
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Observer called with the raw path at the start of every navigation
    ///
    /// Notification only: it cannot cancel or alter the navigation.
    pub fn on_navigate(&mut self, observer: impl Fn(&str) + 'static) {
        self.on_navigate = Some(Box::new(observer));
    }

    /// Handler called with the final path when navigation ends unmatched
    pub fn not_found(&mut self, handler: impl Fn(&str) + 'static) {
        self.not_found = Some(Box::new(handler));
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Dispatches `path` to the first matching route
    ///
    /// Empty and `/` paths are replaced by the default route. When nothing
    /// matches, [`NoMatchPolicy`] decides between redirecting to the default
    /// route (at most [`MAX_REDIRECT_DEPTH`] times), stopping, or failing.
    ///
    /// # Errors
    ///
    /// [`RouterError::NoMatch`] under [`NoMatchPolicy::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder_router::{Router, RouterOptions};
    ///
    /// let mut router = Router::new(RouterOptions::default().with_default_route("/home"));
    /// router.route("/home", |_| {}).unwrap();
    ///
    /// let nav = router.navigate("/missing").unwrap();
    /// assert!(nav.redirected);
    /// assert_eq!(nav.resolved, "/home");
    /// assert_eq!(nav.matched, Some(0));
    /// ```
    pub fn navigate(&mut self, path: &str) -> Result<Navigation> {
        let requested = path.to_string();
        let mut redirected = false;
        let mut state = NavState::Matching {
            path: requested.clone(),
            depth: 0,
        };

        loop {
            state = match state {
                NavState::Matching { path, depth } => {
                    if let Some(observer) = &self.on_navigate {
                        observer(&path);
                    }

                    let path = self.resolve_path(&path);
                    match self.dispatch(&path) {
                        Some(index) => NavState::Done(Navigation {
                            requested: requested.clone(),
                            resolved: path,
                            matched: Some(index),
                            redirected,
                        }),
                        None => NavState::NoMatch { path, depth },
                    }
                }
                NavState::NoMatch { path, depth } => {
                    let at_default = path == self.options.default_route;
                    match self.options.no_match {
                        NoMatchPolicy::Error => {
                            warn!(path = %path, "no route matched");
                            return Err(RouterError::NoMatch { path });
                        }
                        NoMatchPolicy::Redirect if !at_default && depth < MAX_REDIRECT_DEPTH => {
                            NavState::Redirecting {
                                from: path,
                                to: self.options.default_route.clone(),
                                depth: depth + 1,
                            }
                        }
                        _ => {
                            warn!(path = %path, "no route matched, navigation stops");
                            if let Some(handler) = &self.not_found {
                                handler(&path);
                            }
                            NavState::Done(Navigation {
                                requested: requested.clone(),
                                resolved: path,
                                matched: None,
                                redirected,
                            })
                        }
                    }
                }
                NavState::Redirecting { from, to, depth } => {
                    info!(from = %from, to = %to, "no route matched, redirecting to default route");
                    if let Some(history) = self.history.as_mut() {
                        history.push_state(&to, &to);
                    }
                    redirected = true;
                    NavState::Matching { path: to, depth }
                }
                NavState::Done(navigation) => return Ok(navigation),
            };
        }
    }

    /// Feeds a navigation-source event to the router
    ///
    /// In-app link clicks push the link onto history and dispatch its path;
    /// external links come back as [`EventOutcome::PassThrough`]. Pop-state
    /// dispatches whatever the history now reports.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidState`] when no history is attached, plus any
    /// error from [`navigate`](Self::navigate).
    pub fn handle_event(&mut self, event: NavigationEvent) -> Result<EventOutcome> {
        let history = self.history_mut()?;

        let path = match event {
            NavigationEvent::LinkClicked { href, title } => {
                let Some(path) = history.origin().in_app_path(&href) else {
                    debug!(href = %href, "external link, passing through");
                    return Ok(EventOutcome::PassThrough);
                };
                let title = title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| history.document_title());
                history.push_state(&title, &href);
                path
            }
            NavigationEvent::PopState => history.current_path(),
        };

        self.navigate(&path).map(EventOutcome::Navigated)
    }

    /// Dispatches the location the history currently shows
    pub fn start(&mut self) -> Result<Navigation> {
        let path = self.history_mut()?.current_path();
        self.navigate(&path)
    }

    fn history_mut(&mut self) -> Result<&mut Box<dyn History>> {
        self.history
            .as_mut()
            .ok_or_else(|| RouterError::InvalidState("no history attached to router".to_string()))
    }

    fn resolve_path(&self, path: &str) -> String {
        let path = if is_root_or_empty(path) {
            self.options.default_route.as_str()
        } else {
            path
        };

        if self.options.normalize_paths {
            normalize_path(path).into_owned()
        } else {
            path.to_string()
        }
    }

    /// Runs the first matching handler and returns its index
    fn dispatch(&self, path: &str) -> Option<usize> {
        let segments = split_segments(path);

        let (index, route, params) = self.routes.iter().enumerate().find_map(|(index, route)| {
            route
                .matches(path, &segments, self.options.case_insensitive)
                .map(|params| (index, route, params))
        })?;

        debug!(path = %path, pattern = %route.pattern(), index, "route matched");
        route.invoke(&params);
        Some(index)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouterOptions::default())
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("options", &self.options)
            .field("history", &self.history.is_some())
            .finish()
    }
}
