//! Filesystem template source

use crate::error::{Result, ViewError};
use crate::source::TemplateSource;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Filesystem template source
///
/// Maps template URLs onto files under a root directory:
/// `/views/page.mst` → `{root}/views/page.mst`. URLs that would escape the
/// root (`..`) are refused.
#[derive(Debug, Clone)]
pub struct FilesystemSource {
    root: PathBuf,
}

impl FilesystemSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the file path for a template URL
    fn url_to_path(&self, url: &str) -> Result<PathBuf> {
        let relative = Path::new(url.trim_start_matches('/'));

        let escapes_root = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            return Err(ViewError::fetch(url, "path escapes the template root"));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl TemplateSource for FilesystemSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let path = self.url_to_path(url)?;
        fs::read_to_string(&path)
            .await
            .map_err(|e| ViewError::fetch(url, format!("{}: {}", path.display(), e)))
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}
