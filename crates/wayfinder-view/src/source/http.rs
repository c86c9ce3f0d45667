//! HTTP template source (feature `http`)

use crate::error::{Result, ViewError};
use crate::source::TemplateSource;
use async_trait::async_trait;
use url::Url;

/// Fetches templates over HTTP(S) relative to an application origin
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: Url,
    client: reqwest::Client,
}

impl HttpSource {
    /// `origin` such as `https://example.com/`
    ///
    /// Template URLs are resolved with URL-reference rules. Root-relative
    /// ones like `/views/page.mst` resolve against the origin root, so any
    /// path on `origin` is ignored for them.
    pub fn new(origin: &str) -> Result<Self> {
        let base = Url::parse(origin)
            .map_err(|e| ViewError::InvalidArgument(format!("bad origin {:?}: {}", origin, e)))?;
        Ok(Self {
            base,
            client: reqwest::Client::new(),
        })
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn absolute(&self, url: &str) -> Result<Url> {
        self.base.join(url).map_err(|e| ViewError::fetch(url, e))
    }
}

#[async_trait]
impl TemplateSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let absolute = self.absolute(url)?;

        let response = self
            .client
            .get(absolute)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ViewError::fetch(url, e))?;

        response.text().await.map_err(|e| ViewError::fetch(url, e))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
