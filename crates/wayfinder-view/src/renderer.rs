//! Fetch-and-substitute pipeline

use crate::dom::{Document, DomNode, RenderTarget};
use crate::engine::{Mustache, TemplateEngine};
use crate::error::{Result, ViewError};
use crate::markdown::MarkdownRenderer;
use crate::source::TemplateSource;
use crate::template::{ViewConfig, ViewOptions};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::debug;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Receives the rendered HTML of a [`ViewRenderer::get_html`] call
pub type HtmlCallback = Box<dyn FnOnce(String) + Send>;

/// Renders named templates into DOM nodes or strings
///
/// Each call performs exactly one fetch. Calls are independent: nothing is
/// cached, coalesced or cancelled, so two renders into the same node apply
/// in the order their fetches resolve.
pub struct ViewRenderer {
    config: ViewConfig,
    source: Arc<dyn TemplateSource>,
    engine: Arc<dyn TemplateEngine>,
    document: Option<Arc<dyn Document>>,
    markdown: Option<Arc<dyn MarkdownRenderer>>,
}

impl ViewRenderer {
    /// Create a renderer with the mustache engine and, when the `markdown`
    /// feature is on, CommonMark pre-processing available
    pub fn new(config: ViewConfig, source: impl TemplateSource + 'static) -> Self {
        Self::from_source(config, Arc::new(source))
    }

    pub fn from_source(config: ViewConfig, source: Arc<dyn TemplateSource>) -> Self {
        Self {
            config,
            source,
            engine: Arc::new(Mustache),
            document: None,
            markdown: default_markdown(),
        }
    }

    pub fn with_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Document used to resolve selector targets
    pub fn with_document(mut self, document: Arc<dyn Document>) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_markdown(mut self, markdown: impl MarkdownRenderer + 'static) -> Self {
        self.markdown = Some(Arc::new(markdown));
        self
    }

    /// Removes the markdown capability; the `markdown` option is then ignored
    pub fn without_markdown(mut self) -> Self {
        self.markdown = None;
        self
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn has_markdown(&self) -> bool {
        self.markdown.is_some()
    }

    /// Fetches and renders a view, returning the HTML
    ///
    /// # Errors
    ///
    /// - [`ViewError::InvalidArgument`] for empty delimiters (before fetching)
    /// - [`ViewError::Fetch`] when the source fails
    /// - [`ViewError::Template`] for malformed templates
    pub async fn render_to_string(
        &self,
        view: &str,
        params: &Value,
        options: &ViewOptions,
    ) -> Result<String> {
        let delimiters = options
            .delimiters
            .as_ref()
            .unwrap_or(&self.config.delimiters);
        delimiters.validate()?;

        let url = self.config.resolve_url(view);
        debug!(url = %url, source = self.source.name(), "fetching template");
        let template = self.source.fetch(&url).await?;

        let template = match (options.markdown, &self.markdown) {
            (true, Some(markdown)) => markdown.render(&template),
            (true, None) => {
                debug!(url = %url, "markdown requested but unavailable, using raw template");
                template
            }
            (false, _) => template,
        };

        self.engine.render(&template, params, delimiters)
    }

    /// Renders a view into `target`
    ///
    /// Replaces the target's children unless `options.append` is set, in
    /// which case the HTML is appended after existing content.
    ///
    /// # Errors
    ///
    /// [`ViewError::TargetNotFound`] when a selector does not resolve; this is
    /// checked before the fetch. Otherwise as [`render_to_string`](Self::render_to_string).
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use std::sync::Arc;
    /// use wayfinder_view::{DomNode, MemoryNode, MemorySource, ViewConfig, ViewOptions, ViewRenderer};
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let source = MemorySource::new().with_template("/views/page.mst", "Hello {{name}}");
    /// let renderer = ViewRenderer::new(ViewConfig::default(), source);
    ///
    /// let node = MemoryNode::with_html("<p>old</p>");
    /// renderer
    ///     .render(node.clone(), "page", &json!({ "name": "X" }), &ViewOptions::default())
    ///     .await
    ///     .unwrap();
    /// assert_eq!(node.inner_html(), "Hello X");
    /// # });
    /// ```
    pub async fn render(
        &self,
        target: impl Into<RenderTarget>,
        view: &str,
        params: &Value,
        options: &ViewOptions,
    ) -> Result<()> {
        let node = self.resolve_target(target.into())?;
        let html = self.render_to_string(view, params, options).await?;

        if options.append {
            node.append_html(&html);
        } else {
            node.clear_children();
            node.set_inner_html(&html);
        }
        debug!(view, append = options.append, bytes = html.len(), "view rendered");
        Ok(())
    }

    /// [`render`](Self::render), then `callback` once the write is done
    ///
    /// The callback does not run when rendering fails.
    pub async fn render_with_callback<F>(
        &self,
        target: impl Into<RenderTarget>,
        view: &str,
        params: &Value,
        options: &ViewOptions,
        callback: F,
    ) -> Result<()>
    where
        F: FnOnce(),
    {
        self.render(target, view, params, options).await?;
        callback();
        Ok(())
    }

    /// Renders a view and hands the HTML to `callback`
    ///
    /// Argument checks happen synchronously: a missing callback or empty
    /// delimiters fail here, before any fetch. The returned future performs
    /// the fetch and invokes the callback.
    ///
    /// # Errors
    ///
    /// [`ViewError::InvalidArgument`] if `callback` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use wayfinder_view::{MemorySource, ViewConfig, ViewError, ViewOptions, ViewRenderer};
    ///
    /// let renderer = ViewRenderer::new(ViewConfig::default(), MemorySource::new());
    /// let err = renderer
    ///     .get_html("page", &json!({}), &ViewOptions::default(), None)
    ///     .err()
    ///     .unwrap();
    /// assert!(matches!(err, ViewError::InvalidArgument(_)));
    /// ```
    pub fn get_html(
        &self,
        view: &str,
        params: &Value,
        options: &ViewOptions,
        callback: Option<HtmlCallback>,
    ) -> Result<BoxFuture<'_, Result<()>>> {
        let callback = callback
            .ok_or_else(|| ViewError::InvalidArgument("callback is not a function".to_string()))?;
        options
            .delimiters
            .as_ref()
            .unwrap_or(&self.config.delimiters)
            .validate()?;

        let view = view.to_string();
        let params = params.clone();
        let options = options.clone();

        Ok(Box::pin(async move {
            let html = self.render_to_string(&view, &params, &options).await?;
            callback(html);
            Ok(())
        }))
    }

    fn resolve_target(&self, target: RenderTarget) -> Result<Arc<dyn DomNode>> {
        match target {
            RenderTarget::Node(node) => Ok(node),
            RenderTarget::Selector(selector) => self
                .document
                .as_ref()
                .and_then(|document| document.query_selector(&selector))
                .ok_or(ViewError::TargetNotFound(selector)),
        }
    }
}

#[cfg(feature = "markdown")]
fn default_markdown() -> Option<Arc<dyn MarkdownRenderer>> {
    Some(Arc::new(crate::markdown::CommonMark))
}

#[cfg(not(feature = "markdown"))]
fn default_markdown() -> Option<Arc<dyn MarkdownRenderer>> {
    None
}
