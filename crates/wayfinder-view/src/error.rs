//! View rendering error types

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A caller-supplied argument is unusable (missing callback, empty delimiter)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A selector target did not resolve to a node
    #[error("render target not found: {0}")]
    TargetNotFound(String),

    /// The template could not be fetched
    #[error("failed to fetch template {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The template text is malformed
    #[error("template error: {0}")]
    Template(String),
}

impl ViewError {
    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        ViewError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;
