//! # Wayfinder View
//!
//! Renders external template files for single-page applications:
//! resolve `{view_location}/{name}.mst`, fetch it, optionally run markdown,
//! substitute parameters, and write the result into a node or return it.
//!
//! Every collaborator is a trait: [`TemplateSource`] fetches, [`TemplateEngine`]
//! substitutes, [`Document`]/[`DomNode`] receive output, [`MarkdownRenderer`]
//! pre-processes. Delimiters travel with each request in [`ViewOptions`].

mod error;

pub mod dom;
pub mod engine;
pub mod markdown;
pub mod renderer;
pub mod source;
pub mod template;

pub use dom::{Document, DomNode, MemoryDocument, MemoryNode, RenderTarget};
pub use engine::{Mustache, TemplateEngine};
pub use error::{Result, ViewError};
#[cfg(feature = "markdown")]
pub use markdown::CommonMark;
pub use markdown::MarkdownRenderer;
pub use renderer::{BoxFuture, HtmlCallback, ViewRenderer};
pub use source::filesystem::FilesystemSource;
#[cfg(feature = "http")]
pub use source::http::HttpSource;
pub use source::memory::MemorySource;
pub use source::TemplateSource;
pub use template::{Delimiters, ViewConfig, ViewOptions};
