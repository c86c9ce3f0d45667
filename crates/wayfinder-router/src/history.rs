//! Navigation source abstraction
//!
//! The router never touches browser globals. It talks to a [`History`]
//! implementation, and link clicks / back-forward events arrive as
//! [`NavigationEvent`] values fed to [`Router::handle_event`].
//!
//! [`Router::handle_event`]: crate::Router::handle_event

use crate::path::strip_query_and_fragment;
use std::cell::RefCell;
use std::rc::Rc;

/// Scheme and host of the running application, e.g. `https` + `example.com`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
}

impl Origin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    /// Resolves a link target to an in-app path, or `None` if it leaves the app
    ///
    /// Accepted forms:
    /// - root-relative `/path`, whatever its query string holds
    /// - protocol-relative `//host/path`
    /// - `scheme://host/path` where both scheme and host are the app's
    /// - `host/path`
    ///
    /// Query strings and fragments are dropped from the returned path.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder_router::history::Origin;
    ///
    /// let origin = Origin::new("https", "example.com");
    /// assert_eq!(origin.in_app_path("https://example.com/users/1").as_deref(), Some("/users/1"));
    /// assert_eq!(origin.in_app_path("example.com/about?x=1").as_deref(), Some("/about"));
    /// assert_eq!(origin.in_app_path("/docs#intro").as_deref(), Some("/docs"));
    /// assert_eq!(origin.in_app_path("https://elsewhere.org/"), None);
    /// assert_eq!(origin.in_app_path("http://example.com/"), None);
    /// ```
    pub fn in_app_path(&self, href: &str) -> Option<String> {
        if let Some(authority) = href.strip_prefix("//") {
            return self.path_on_host(authority);
        }
        if href.starts_with('/') {
            return Some(strip_query_and_fragment(href).to_string());
        }

        // A `://` inside the query or fragment is not a scheme separator
        let target = strip_query_and_fragment(href);
        match target.split_once("://") {
            Some((scheme, rest)) if scheme.eq_ignore_ascii_case(&self.scheme) => {
                self.path_on_host(rest)
            }
            Some(_) => None,
            None => self.path_on_host(target),
        }
    }

    /// Path part of `host/path...` when the host is this origin's
    fn path_on_host(&self, authority: &str) -> Option<String> {
        let rest = authority.strip_prefix(self.host.as_str())?;
        // `example.com.evil.org` must not count as `example.com`
        if !(rest.is_empty() || rest.starts_with(['/', '?', '#'])) {
            return None;
        }

        let path = strip_query_and_fragment(rest);
        Some(if path.is_empty() { "/".to_string() } else { path.to_string() })
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::new("http", "localhost")
    }
}

/// A history entry pushed by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub title: String,
    pub url: String,
}

/// Capability the router uses to read and update the visible location
pub trait History {
    /// Path currently shown in the location bar (no query, no fragment)
    fn current_path(&self) -> String;

    /// Origin used to tell in-app links from external ones
    fn origin(&self) -> Origin;

    /// Pushes a new entry; `url` becomes the visible location
    fn push_state(&mut self, title: &str, url: &str);

    /// Title used for pushed entries when a link has none of its own
    fn document_title(&self) -> String {
        String::new()
    }
}

/// Events a navigation source reports to the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// An anchor was activated; `title` is the link's own title, if any
    LinkClicked { href: String, title: Option<String> },
    /// Back/forward navigation changed the location
    PopState,
}

impl NavigationEvent {
    pub fn link(href: impl Into<String>) -> Self {
        NavigationEvent::LinkClicked {
            href: href.into(),
            title: None,
        }
    }
}

#[derive(Debug, Default)]
struct MemoryHistoryState {
    entries: Vec<HistoryEntry>,
    index: usize,
    initial_path: String,
}

/// In-memory history for headless use and tests
///
/// Clones share state, so a test can keep a handle while the router owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    origin: Origin,
    state: Rc<RefCell<MemoryHistoryState>>,
}

impl MemoryHistory {
    /// Creates a history positioned at `initial_path`
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self::with_origin(Origin::default(), initial_path)
    }

    pub fn with_origin(origin: Origin, initial_path: impl Into<String>) -> Self {
        let state = MemoryHistoryState {
            initial_path: initial_path.into(),
            ..Default::default()
        };
        Self {
            origin,
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Every entry pushed so far, oldest first
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.state.borrow().entries.clone()
    }

    /// Moves one entry back, the way a browser back button would
    ///
    /// Returns `false` when already at the initial location. Feed
    /// [`NavigationEvent::PopState`] to the router afterwards.
    pub fn back(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.index == 0 {
            return false;
        }
        state.index -= 1;
        true
    }

    /// Moves one entry forward; the counterpart of [`back`](Self::back)
    pub fn forward(&self) -> bool {
        let mut state = self.state.borrow_mut();
        if state.index >= state.entries.len() {
            return false;
        }
        state.index += 1;
        true
    }
}

impl History for MemoryHistory {
    fn current_path(&self) -> String {
        let state = self.state.borrow();
        let url = match state.index {
            0 => state.initial_path.as_str(),
            n => state.entries[n - 1].url.as_str(),
        };

        // Pushed hrefs may be absolute
        self.origin
            .in_app_path(url)
            .unwrap_or_else(|| strip_query_and_fragment(url).to_string())
    }

    fn origin(&self) -> Origin {
        self.origin.clone()
    }

    fn push_state(&mut self, title: &str, url: &str) {
        let mut state = self.state.borrow_mut();
        let index = state.index;
        // Pushing discards any forward entries
        state.entries.truncate(index);
        state.entries.push(HistoryEntry {
            title: title.to_string(),
            url: url.to_string(),
        });
        state.index = state.entries.len();
    }
}
