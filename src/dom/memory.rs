//! In-memory document used by the headless host and by tests

use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{self, BoxFuture};
use tokio::sync::broadcast;

use super::{Dom, NodeId};

#[derive(Debug, Clone, Default)]
enum Body {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    body: Body,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            styles: Vec::new(),
            body: Body::Empty,
            children: Vec::new(),
            parent: None,
        }
    }
}

/// A minimal element tree. Node 0 is the document body; only nodes attached
/// below it are found by lookups.
#[derive(Debug)]
pub struct MemoryDom {
    elements: Mutex<Vec<Element>>,
    transitions: broadcast::Sender<NodeId>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    pub fn new() -> Self {
        let (transitions, _) = broadcast::channel(16);
        Self {
            elements: Mutex::new(vec![Element::new("body")]),
            transitions,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Element>> {
        self.elements.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver a native "transition finished" notification for `node`
    pub fn dispatch_transition_end(&self, node: NodeId) {
        // No listener is fine: nobody is animating that node.
        let _ = self.transitions.send(node);
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.lock()
            .get(node.0)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    /// All attached descendants of `scope` carrying `class`
    pub fn query_class_all(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let elements = self.lock();
        let mut found = Vec::new();
        walk(&elements, scope, &mut |id, el| {
            if id != scope && el.classes.iter().any(|c| c == class) {
                found.push(id);
            }
            false
        });
        found
    }

    /// Serialized markup of `node` including the node itself
    pub fn outer_html(&self, node: NodeId) -> String {
        let elements = self.lock();
        let mut out = String::new();
        write_element(&elements, node, &mut out);
        out
    }
}

/// Depth-first walk; stops early when `visit` returns true.
fn walk(
    elements: &[Element],
    node: NodeId,
    visit: &mut dyn FnMut(NodeId, &Element) -> bool,
) -> bool {
    let Some(el) = elements.get(node.0) else {
        return false;
    };
    if visit(node, el) {
        return true;
    }
    el.children
        .iter()
        .any(|child| walk(elements, *child, visit))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn write_inner(elements: &[Element], el: &Element, out: &mut String) {
    match &el.body {
        Body::Empty => {}
        Body::Text(text) => out.push_str(&escape(text)),
        Body::Html(html) => out.push_str(html),
    }
    for child in &el.children {
        write_element(elements, *child, out);
    }
}

fn write_element(elements: &[Element], node: NodeId, out: &mut String) {
    let Some(el) = elements.get(node.0) else {
        return;
    };
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attributes {
        out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
    }
    if !el.classes.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape(&el.classes.join(" "))));
    }
    if !el.styles.is_empty() {
        let style = el
            .styles
            .iter()
            .map(|(prop, value)| format!("{prop}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(" style=\"{}\"", escape(&style)));
    }
    out.push('>');
    write_inner(elements, el, out);
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn text_of(elements: &[Element], node: NodeId, out: &mut String) {
    let Some(el) = elements.get(node.0) else {
        return;
    };
    match &el.body {
        Body::Empty => {}
        Body::Text(text) => out.push_str(text),
        Body::Html(html) => out.push_str(&strip_tags(html)),
    }
    for child in &el.children {
        text_of(elements, *child, out);
    }
}

impl Dom for MemoryDom {
    fn body(&self) -> NodeId {
        NodeId(0)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let elements = self.lock();
        let mut found = None;
        walk(&elements, self.body(), &mut |node, el| {
            let hit = el.attributes.iter().any(|(k, v)| k == "id" && v == id);
            if hit {
                found = Some(node);
            }
            hit
        });
        found
    }

    fn query_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        let elements = self.lock();
        let mut found = None;
        walk(&elements, scope, &mut |node, el| {
            let hit = node != scope && el.classes.iter().any(|c| c == class);
            if hit {
                found = Some(node);
            }
            hit
        });
        found
    }

    fn create_element(&self, tag: &str) -> NodeId {
        let mut elements = self.lock();
        elements.push(Element::new(tag));
        NodeId(elements.len() - 1)
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut elements = self.lock();
        if parent == child || parent.0 >= elements.len() || child.0 >= elements.len() {
            return;
        }
        if let Some(old) = elements[child.0].parent {
            elements[old.0].children.retain(|c| *c != child);
        }
        elements[child.0].parent = Some(parent);
        elements[parent.0].children.push(child);
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(el) = self.lock().get_mut(node.0) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(el) = self.lock().get_mut(node.0) {
            el.children.clear();
            el.body = Body::Text(text.to_string());
        }
    }

    fn text(&self, node: NodeId) -> String {
        let elements = self.lock();
        let mut out = String::new();
        text_of(&elements, node, &mut out);
        out
    }

    fn set_inner_html(&self, node: NodeId, html: &str) {
        if let Some(el) = self.lock().get_mut(node.0) {
            el.children.clear();
            el.body = Body::Html(html.to_string());
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        let elements = self.lock();
        let mut out = String::new();
        if let Some(el) = elements.get(node.0) {
            write_inner(&elements, el, &mut out);
        }
        out
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        let mut elements = self.lock();
        let Some(el) = elements.get_mut(node.0) else {
            return;
        };
        if value.is_empty() {
            el.styles.retain(|(prop, _)| prop != property);
        } else if let Some(slot) = el.styles.iter_mut().find(|(prop, _)| prop == property) {
            slot.1 = value.to_string();
        } else {
            el.styles.push((property.to_string(), value.to_string()));
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.lock().get(node.0).and_then(|el| {
            el.styles
                .iter()
                .find(|(prop, _)| prop == property)
                .map(|(_, value)| value.clone())
        })
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        let mut elements = self.lock();
        let Some(el) = elements.get_mut(node.0) else {
            return;
        };
        if let Some(slot) = el.attributes.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_string();
        } else {
            el.attributes.push((name.to_string(), value.to_string()));
        }
    }

    fn remove_attribute(&self, node: NodeId, name: &str) {
        if let Some(el) = self.lock().get_mut(node.0) {
            el.attributes.retain(|(k, _)| k != name);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.lock().get(node.0).and_then(|el| {
            el.attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        })
    }

    fn transition_end(&self, node: NodeId) -> BoxFuture<'static, ()> {
        let mut events = self.transitions.subscribe();
        Box::pin(async move {
            loop {
                match events.recv().await {
                    Ok(finished) if finished == node => return,
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => future::pending::<()>().await,
                }
            }
        })
    }
}
