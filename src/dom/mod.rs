//! DOM binding
//!
//! The widget never talks to a document directly. It goes through the [`Dom`]
//! trait, resolves its nodes once into a [`DomBinding`], and branches on each
//! optional node before touching it.

pub mod markup;
pub mod memory;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use memory::MemoryDom;

/// Opaque handle to an element in a [`Dom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Element operations the widget needs from its host document.
///
/// Style properties use their CSS names (`background-color`, not
/// `backgroundColor`). Setting a style to an empty string clears it.
pub trait Dom: Send + Sync {
    /// Document body, where top-level widgets are attached
    fn body(&self) -> NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// First descendant of `scope` carrying `class`
    fn query_class(&self, scope: NodeId, class: &str) -> Option<NodeId>;

    fn create_element(&self, tag: &str) -> NodeId;
    fn append_child(&self, parent: NodeId, child: NodeId);
    fn add_class(&self, node: NodeId, class: &str);

    fn set_text(&self, node: NodeId, text: &str);
    fn text(&self, node: NodeId) -> String;
    fn set_inner_html(&self, node: NodeId, html: &str);
    fn inner_html(&self, node: NodeId) -> String;

    fn set_style(&self, node: NodeId, property: &str, value: &str);
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    fn set_attribute(&self, node: NodeId, name: &str, value: &str);
    fn remove_attribute(&self, node: NodeId, name: &str);
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Resolves on the next native "transition finished" notification for
    /// `node`. Listening starts when this is called, not when it is polled.
    fn transition_end(&self, node: NodeId) -> BoxFuture<'static, ()>;
}

/// Identifiers and classes the page markup must carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomContract {
    pub root_id: String,
    pub countdown_id: String,
    pub inner_class: String,
    pub content_class: String,
    pub countdown_wrapper_class: String,
    pub link_class: String,
}

impl Default for DomContract {
    fn default() -> Self {
        Self {
            root_id: "countdown-notice".to_string(),
            countdown_id: "countdown-notice-timer".to_string(),
            inner_class: "countdown-notice-inner".to_string(),
            content_class: "countdown-notice-content".to_string(),
            countdown_wrapper_class: "countdown-notice-countdown".to_string(),
            link_class: "countdown-notice-link".to_string(),
        }
    }
}

/// Banner nodes, looked up once when the widget starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomBinding {
    pub root: NodeId,
    pub countdown: Option<NodeId>,
    pub inner: Option<NodeId>,
    pub content: Option<NodeId>,
    pub countdown_wrapper: Option<NodeId>,
    pub link: Option<NodeId>,
    pub link_class: String,
}

impl DomBinding {
    /// Returns `None` when the banner root is missing; the widget stays inert.
    pub fn resolve(dom: &dyn Dom, contract: &DomContract) -> Option<Self> {
        let Some(root) = dom.element_by_id(&contract.root_id) else {
            debug!("Banner root #{} not found", contract.root_id);
            return None;
        };

        let binding = Self {
            root,
            countdown: dom.element_by_id(&contract.countdown_id),
            inner: dom.query_class(root, &contract.inner_class),
            content: dom.query_class(root, &contract.content_class),
            countdown_wrapper: dom.query_class(root, &contract.countdown_wrapper_class),
            link: dom.query_class(root, &contract.link_class),
            link_class: contract.link_class.clone(),
        };
        debug!("Resolved banner binding: {:?}", binding);
        Some(binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_leaves_widget_unbound() {
        let dom = MemoryDom::new();
        assert!(DomBinding::resolve(&dom, &DomContract::default()).is_none());
    }

    #[test]
    fn optional_nodes_resolve_independently() {
        let contract = DomContract::default();
        let dom = MemoryDom::new();
        let root = dom.create_element("div");
        dom.set_attribute(root, "id", &contract.root_id);
        dom.append_child(dom.body(), root);
        let content = dom.create_element("div");
        dom.add_class(content, &contract.content_class);
        dom.append_child(root, content);

        let binding = DomBinding::resolve(&dom, &contract).unwrap();
        assert_eq!(binding.root, root);
        assert_eq!(binding.content, Some(content));
        assert_eq!(binding.countdown, None);
        assert_eq!(binding.link, None);
    }
}
