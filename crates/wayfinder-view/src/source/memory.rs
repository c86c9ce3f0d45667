//! In-memory template source

use crate::error::{Result, ViewError};
use crate::source::TemplateSource;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Entry {
    body: String,
    delay: Option<Duration>,
}

/// In-memory template source
///
/// Templates are keyed by full URL. An optional per-URL delay simulates a
/// slow network so out-of-order completion can be exercised. Every fetch is
/// recorded.
#[derive(Debug, Default)]
pub struct MemorySource {
    templates: HashMap<String, Entry>,
    fetches: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.templates.insert(
            url.into(),
            Entry {
                body: body.into(),
                delay: None,
            },
        );
        self
    }

    /// Registers a template that resolves only after `delay`
    pub fn with_delayed_template(
        mut self,
        url: impl Into<String>,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.templates.insert(
            url.into(),
            Entry {
                body: body.into(),
                delay: Some(delay),
            },
        );
        self
    }

    /// Number of fetches issued so far, including failed ones
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// URLs fetched so far, in request order
    pub fn fetched(&self) -> Vec<String> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl TemplateSource for MemorySource {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        let entry = self
            .templates
            .get(url)
            .cloned()
            .ok_or_else(|| ViewError::fetch(url, "404 not found"))?;

        if let Some(delay) = entry.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(entry.body)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
