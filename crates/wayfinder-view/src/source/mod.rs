//! Template sources: where template text is fetched from

use crate::error::Result;
use async_trait::async_trait;

pub mod filesystem;
pub mod memory;

#[cfg(feature = "http")]
pub mod http;

/// Fetches template text by URL
///
/// One call is one fetch. Sources do not cache or coalesce requests.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Fetch the body at `url`, e.g. `/views/page.mst`
    async fn fetch(&self, url: &str) -> Result<String>;

    /// Get source backend name
    fn name(&self) -> &'static str;
}
