//! Router error types

use thiserror::Error;

/// Errors raised by route registration and navigation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A route pattern could not be parsed
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The router was asked to do something its state cannot support
    #[error("invalid router state: {0}")]
    InvalidState(String),

    /// Navigation found no route and the policy asked for an error
    #[error("no route matches {path:?}")]
    NoMatch { path: String },
}

impl RouterError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;
