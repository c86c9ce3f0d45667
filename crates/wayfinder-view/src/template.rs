// File: src/template.rs
// Purpose: View name resolution and per-request render options

use crate::error::{Result, ViewError};
use serde::{Deserialize, Serialize};

/// Placeholder delimiters, `{{` / `}}` by default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Rejects empty delimiters, which would make every position a tag
    pub fn validate(&self) -> Result<()> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(ViewError::InvalidArgument(format!(
                "delimiters must be non-empty, got {:?} / {:?}",
                self.open, self.close
            )));
        }
        Ok(())
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

impl From<[&str; 2]> for Delimiters {
    fn from([open, close]: [&str; 2]) -> Self {
        Self::new(open, close)
    }
}

/// Where templates live and how their file names are formed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Base URL path for templates (default: `/views`)
    pub view_location: String,
    /// Template file extension without the dot (default: `mst`)
    pub extension: String,
    /// Delimiters used when a request does not name its own
    pub delimiters: Delimiters,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            view_location: "/views".to_string(),
            extension: "mst".to_string(),
            delimiters: Delimiters::default(),
        }
    }
}

impl ViewConfig {
    /// Resolves a view name to its template URL
    ///
    /// A caller-supplied extension is stripped and the configured one
    /// appended, so `page` and `page.mst` resolve identically.
    ///
    /// # Examples
    ///
    /// ```
    /// use wayfinder_view::ViewConfig;
    ///
    /// let config = ViewConfig::default();
    /// assert_eq!(config.resolve_url("page"), "/views/page.mst");
    /// assert_eq!(config.resolve_url("page.mst"), "/views/page.mst");
    /// assert_eq!(config.resolve_url("users/list"), "/views/users/list.mst");
    /// ```
    pub fn resolve_url(&self, view: &str) -> String {
        let suffix = format!(".{}", self.extension);
        let name = view.strip_suffix(suffix.as_str()).unwrap_or(view);
        let location = self.view_location.trim_end_matches('/');
        let name = name.trim_start_matches('/');
        format!("{}/{}{}", location, name, suffix)
    }
}

/// Options for a single render request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Overrides the configured delimiters for this request only
    pub delimiters: Option<Delimiters>,
    /// Append after existing content instead of replacing it
    pub append: bool,
    /// Run the template through markdown before substitution, if available
    pub markdown: bool,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiters(mut self, delimiters: impl Into<Delimiters>) -> Self {
        self.delimiters = Some(delimiters.into());
        self
    }

    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }
}
