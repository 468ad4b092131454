//! Builds the banner subtree the page renderer emits

use tracing::debug;

use super::{Dom, DomContract, NodeId};
use crate::settings::BannerMarkup;

/// Append the banner to the document body and return its root.
///
/// Layout:
/// `div#root > div.inner > [div.content, span.countdown-wrapper > span#countdown, a.link]`
pub fn render_banner(dom: &dyn Dom, contract: &DomContract, banner: &BannerMarkup) -> NodeId {
    let root = dom.create_element("div");
    dom.set_attribute(root, "id", &contract.root_id);
    dom.set_attribute(root, "role", "region");
    if let Some(bg) = banner.bg_color.as_deref().filter(|c| !c.is_empty()) {
        dom.set_style(root, "background-color", bg);
    }
    if let Some(color) = banner.text_color.as_deref().filter(|c| !c.is_empty()) {
        dom.set_style(root, "color", color);
    }

    let inner = dom.create_element("div");
    dom.add_class(inner, &contract.inner_class);
    dom.append_child(root, inner);

    let content = dom.create_element("div");
    dom.add_class(content, &contract.content_class);
    dom.set_inner_html(content, &banner.text);
    dom.append_child(inner, content);

    if banner.countdown_active {
        let wrapper = dom.create_element("span");
        dom.add_class(wrapper, &contract.countdown_wrapper_class);
        dom.append_child(inner, wrapper);

        if !banner.countdown_prefix.is_empty() {
            let prefix = dom.create_element("span");
            dom.set_inner_html(prefix, &banner.countdown_prefix);
            dom.append_child(wrapper, prefix);
        }

        let timer = dom.create_element("span");
        dom.set_attribute(timer, "id", &contract.countdown_id);
        dom.append_child(wrapper, timer);
    }

    if let Some(href) = banner.link.as_deref().filter(|l| !l.is_empty()) {
        let link = dom.create_element("a");
        dom.add_class(link, &contract.link_class);
        dom.set_attribute(link, "href", href);
        if banner.link_tab {
            dom.set_attribute(link, "target", "_blank");
            dom.set_attribute(link, "rel", "noopener noreferrer");
        }
        dom.set_text(link, banner.link_text.as_deref().unwrap_or("Learn more"));
        dom.append_child(inner, link);
    }

    dom.append_child(dom.body(), root);
    debug!("Rendered banner #{}", contract.root_id);
    root
}
