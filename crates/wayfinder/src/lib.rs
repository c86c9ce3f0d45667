//! # Wayfinder
//!
//! A minimal single-page application toolkit: a client-side router that maps
//! paths to handlers, and a view renderer that fetches templates by name and
//! writes the substituted HTML into the page.
//!
//! [`App`] bundles one [`Router`] and one shared [`ViewRenderer`], configured
//! from `wayfinder.toml`.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use wayfinder::{App, Config, MemoryHistory, MemorySource};
//!
//! let source = MemorySource::new().with_template("/views/user.mst", "User {{id}}");
//! let mut app = App::builder(Config::default())
//!     .history(MemoryHistory::new("/"))
//!     .source(source)
//!     .build();
//!
//! let seen = Rc::new(RefCell::new(None));
//! let sink = seen.clone();
//! app.route("/users/:id", move |params| {
//!     *sink.borrow_mut() = params.get("id").map(str::to_string);
//! })
//! .unwrap();
//!
//! app.navigate("/users/7").unwrap();
//! assert_eq!(seen.borrow().as_deref(), Some("7"));
//! ```

pub mod config;
pub mod logging;

pub use config::{Config, LoggingConfig, RoutingConfig, ViewsConfig};

pub use wayfinder_router::{
    EventOutcome, History, HistoryEntry, MemoryHistory, Navigation, NavigationEvent,
    NoMatchPolicy, Origin, Route, RouteParams, RoutePattern, Router, RouterError, RouterOptions,
    Segment,
};
#[cfg(feature = "markdown")]
pub use wayfinder_view::CommonMark;
#[cfg(feature = "http")]
pub use wayfinder_view::HttpSource;
pub use wayfinder_view::{
    BoxFuture, Delimiters, Document, DomNode, FilesystemSource, HtmlCallback, MarkdownRenderer,
    MemoryDocument, MemoryNode, MemorySource, Mustache, RenderTarget, TemplateEngine,
    TemplateSource, ViewConfig, ViewError, ViewOptions, ViewRenderer,
};

pub use regex::Regex;
use serde_json::Value;
use std::sync::Arc;

/// Router plus view renderer for one application session
///
/// The router is single-threaded and owned; the renderer is shared behind an
/// `Arc` so route handlers can capture it (see [`App::views`]).
pub struct App {
    router: Router,
    views: Arc<ViewRenderer>,
}

impl App {
    /// Starts building an app from configuration
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// Assembles an app from already configured parts
    pub fn from_parts(router: Router, views: ViewRenderer) -> Self {
        Self {
            router,
            views: Arc::new(views),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    /// Shared handle to the view renderer, for capture in route handlers
    pub fn views(&self) -> Arc<ViewRenderer> {
        self.views.clone()
    }

    // ========================================================================
    // Routing
    // ========================================================================

    pub fn route(
        &mut self,
        pattern: &str,
        handler: impl Fn(&RouteParams) + 'static,
    ) -> Result<&mut Self, RouterError> {
        self.router.route(pattern, handler)?;
        Ok(self)
    }

    pub fn route_regex(
        &mut self,
        regex: Regex,
        handler: impl Fn(&RouteParams) + 'static,
    ) -> &mut Self {
        self.router.route_regex(regex, handler);
        self
    }

    pub fn flush(&mut self) {
        self.router.flush();
    }

    pub fn on_navigate(&mut self, observer: impl Fn(&str) + 'static) {
        self.router.on_navigate(observer);
    }

    pub fn not_found(&mut self, handler: impl Fn(&str) + 'static) {
        self.router.not_found(handler);
    }

    pub fn navigate(&mut self, path: &str) -> Result<Navigation, RouterError> {
        self.router.navigate(path)
    }

    pub fn handle_event(&mut self, event: NavigationEvent) -> Result<EventOutcome, RouterError> {
        self.router.handle_event(event)
    }

    /// Dispatches the current history location
    pub fn start(&mut self) -> Result<Navigation, RouterError> {
        self.router.start()
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    pub async fn render(
        &self,
        target: impl Into<RenderTarget>,
        view: &str,
        params: &Value,
        options: &ViewOptions,
    ) -> Result<(), ViewError> {
        self.views.render(target, view, params, options).await
    }

    pub async fn render_with_callback<F>(
        &self,
        target: impl Into<RenderTarget>,
        view: &str,
        params: &Value,
        options: &ViewOptions,
        callback: F,
    ) -> Result<(), ViewError>
    where
        F: FnOnce(),
    {
        self.views
            .render_with_callback(target, view, params, options, callback)
            .await
    }

    pub fn get_html(
        &self,
        view: &str,
        params: &Value,
        options: &ViewOptions,
        callback: Option<HtmlCallback>,
    ) -> Result<BoxFuture<'_, Result<(), ViewError>>, ViewError> {
        self.views.get_html(view, params, options, callback)
    }

    pub async fn render_to_string(
        &self,
        view: &str,
        params: &Value,
        options: &ViewOptions,
    ) -> Result<String, ViewError> {
        self.views.render_to_string(view, params, options).await
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("router", &self.router)
            .field("views", &self.views.config())
            .finish()
    }
}

/// Builder for [`App`]
///
/// Without an explicit source, templates are read from the working directory.
pub struct AppBuilder {
    config: Config,
    router: Router,
    source: Option<Arc<dyn TemplateSource>>,
    document: Option<Arc<dyn Document>>,
    markdown: bool,
}

impl AppBuilder {
    fn new(config: Config) -> Self {
        let router = Router::new(config.routing.to_options());
        Self {
            config,
            router,
            source: None,
            document: None,
            markdown: true,
        }
    }

    /// Binds the router to a navigation source
    pub fn history(mut self, history: impl History + 'static) -> Self {
        self.router.attach_history(history);
        self
    }

    pub fn source(mut self, source: impl TemplateSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn shared_source(mut self, source: Arc<dyn TemplateSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn document(mut self, document: Arc<dyn Document>) -> Self {
        self.document = Some(document);
        self
    }

    /// Turns markdown pre-processing off even when it is compiled in
    pub fn without_markdown(mut self) -> Self {
        self.markdown = false;
        self
    }

    pub fn build(self) -> App {
        let source = self
            .source
            .unwrap_or_else(|| Arc::new(FilesystemSource::new(".")));

        let mut views = ViewRenderer::from_source(self.config.views.to_view_config(), source);
        if let Some(document) = self.document {
            views = views.with_document(document);
        }
        if !self.markdown {
            views = views.without_markdown();
        }

        tracing::debug!(
            default_route = %self.router.default_route(),
            view_location = %views.config().view_location,
            "app built"
        );
        App::from_parts(self.router, views)
    }
}
