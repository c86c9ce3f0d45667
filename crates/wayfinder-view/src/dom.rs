//! DOM abstraction the renderer writes into
//!
//! The renderer needs three operations from a node (clear, set, append) and
//! selector lookup from a document. [`MemoryDocument`] provides both for
//! headless use.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

/// A node whose content the renderer can replace or extend
pub trait DomNode: Send + Sync {
    /// Serialized content of the node
    fn inner_html(&self) -> String;

    /// Removes every child
    fn clear_children(&self);

    fn set_inner_html(&self, html: &str);

    /// Appends after existing content
    fn append_html(&self, html: &str);
}

/// Resolves selectors such as `#content` to nodes
pub trait Document: Send + Sync {
    fn query_selector(&self, selector: &str) -> Option<Arc<dyn DomNode>>;
}

/// Where a render writes: a node handle or a selector resolved at render time
#[derive(Clone)]
pub enum RenderTarget {
    Node(Arc<dyn DomNode>),
    Selector(String),
}

impl fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderTarget::Node(_) => f.write_str("RenderTarget::Node"),
            RenderTarget::Selector(s) => write!(f, "RenderTarget::Selector({:?})", s),
        }
    }
}

impl From<&str> for RenderTarget {
    fn from(selector: &str) -> Self {
        RenderTarget::Selector(selector.to_string())
    }
}

impl From<String> for RenderTarget {
    fn from(selector: String) -> Self {
        RenderTarget::Selector(selector)
    }
}

impl From<Arc<dyn DomNode>> for RenderTarget {
    fn from(node: Arc<dyn DomNode>) -> Self {
        RenderTarget::Node(node)
    }
}

impl From<Arc<MemoryNode>> for RenderTarget {
    fn from(node: Arc<MemoryNode>) -> Self {
        RenderTarget::Node(node)
    }
}

/// In-memory node holding a list of HTML fragments
#[derive(Debug, Default)]
pub struct MemoryNode {
    children: Mutex<Vec<String>>,
}

impl MemoryNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_html(html: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            children: Mutex::new(vec![html.into()]),
        })
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    fn children(&self) -> MutexGuard<'_, Vec<String>> {
        // A poisoned lock still holds valid fragments
        self.children.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DomNode for MemoryNode {
    fn inner_html(&self) -> String {
        self.children().concat()
    }

    fn clear_children(&self) {
        self.children().clear();
    }

    fn set_inner_html(&self, html: &str) {
        let mut children = self.children();
        children.clear();
        children.push(html.to_string());
    }

    fn append_html(&self, html: &str) {
        self.children().push(html.to_string());
    }
}

/// In-memory document mapping selectors to nodes
#[derive(Default)]
pub struct MemoryDocument {
    nodes: RwLock<HashMap<String, Arc<dyn DomNode>>>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node` under `selector`, replacing any previous node
    pub fn insert(&self, selector: impl Into<String>, node: Arc<dyn DomNode>) {
        self.nodes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(selector.into(), node);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_node(self, selector: impl Into<String>, node: Arc<dyn DomNode>) -> Self {
        self.insert(selector, node);
        self
    }
}

impl Document for MemoryDocument {
    fn query_selector(&self, selector: &str) -> Option<Arc<dyn DomNode>> {
        self.nodes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(selector)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_node_operations() {
        let node = MemoryNode::with_html("<p>old</p>");
        node.append_html("<p>more</p>");
        assert_eq!(node.inner_html(), "<p>old</p><p>more</p>");
        assert_eq!(node.child_count(), 2);

        node.clear_children();
        assert_eq!(node.inner_html(), "");

        node.set_inner_html("<p>new</p>");
        assert_eq!(node.inner_html(), "<p>new</p>");
    }

    #[test]
    fn test_document_lookup() {
        let node = MemoryNode::new();
        let document = MemoryDocument::new().with_node("#content", node.clone());

        let found = document.query_selector("#content").unwrap();
        found.set_inner_html("hi");
        assert_eq!(node.inner_html(), "hi");
        assert!(document.query_selector("#missing").is_none());
    }
}
