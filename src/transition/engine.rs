//! Finish-action executor

use std::{sync::Arc, time::Duration};

use serde::Serialize;

use super::animate::{animate, DEFAULT_DURATION};
use crate::{
    dlog,
    dom::{Dom, DomBinding, NodeId},
    settings::{BannerConfig, FinishAction},
    utils::DebugLog,
};

const HIDE_DURATION: Duration = Duration::from_millis(500);

/// Inline styles of the banner root before the first animation touched it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleSnapshot {
    pub transition: Option<String>,
    pub background_color: Option<String>,
    pub color: Option<String>,
    pub height: Option<String>,
    pub opacity: Option<String>,
}

impl StyleSnapshot {
    fn capture(dom: &dyn Dom, node: NodeId) -> Self {
        Self {
            transition: dom.style(node, "transition"),
            background_color: dom.style(node, "background-color"),
            color: dom.style(node, "color"),
            height: dom.style(node, "height"),
            opacity: dom.style(node, "opacity"),
        }
    }
}

/// What happened to the call-to-action link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkChange {
    Created,
    Updated,
    Hidden,
    Untouched,
    /// A link was wanted but the banner has no inner container to hold it
    NoContainer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    Hidden,
    Alternative { link: LinkChange },
    /// `show_alternative` without alternative markup leaves the banner as is
    NothingToShow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionReport {
    #[serde(flatten)]
    pub outcome: TransitionOutcome,
    pub original_styles: Option<StyleSnapshot>,
}

/// Runs the configured finish action against one banner.
///
/// Every animated step waits for the previous one to settle, so no two
/// property changes on the root are ever in flight together.
pub struct TransitionEngine {
    dom: Arc<dyn Dom>,
    binding: DomBinding,
    config: Arc<BannerConfig>,
    log: Arc<dyn DebugLog>,
    original_styles: Option<StyleSnapshot>,
    runs: u32,
}

impl TransitionEngine {
    pub fn new(
        dom: Arc<dyn Dom>,
        binding: DomBinding,
        config: Arc<BannerConfig>,
        log: Arc<dyn DebugLog>,
    ) -> Self {
        Self {
            dom,
            binding,
            config,
            log,
            original_styles: None,
            runs: 0,
        }
    }

    /// How many times the finish action has been started
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn binding(&self) -> &DomBinding {
        &self.binding
    }

    pub fn original_styles(&self) -> Option<&StyleSnapshot> {
        self.original_styles.as_ref()
    }

    pub async fn run(&mut self) -> TransitionReport {
        self.runs += 1;
        dlog!(self.log, "Starting transition: {:?}", self.config.finish_action);

        let outcome = match self.config.finish_action {
            FinishAction::Hide => self.hide().await,
            FinishAction::ShowAlternative => self.show_alternative().await,
        };

        dlog!(self.log, "Transition finished: {:?}", outcome);
        TransitionReport {
            outcome,
            original_styles: self.original_styles.clone(),
        }
    }

    async fn animate_root(&mut self, properties: &[(&str, &str)], duration: Duration) {
        let root = self.binding.root;
        if self.original_styles.is_none() {
            self.original_styles = Some(StyleSnapshot::capture(&*self.dom, root));
        }
        let settled = animate(&*self.dom, root, properties, duration).await;
        dlog!(self.log, "Animation settled by {:?}", settled);
    }

    async fn hide(&mut self) -> TransitionOutcome {
        dlog!(self.log, "Collapsing banner");
        self.animate_root(
            &[
                ("opacity", "0"),
                ("height", "0"),
                ("padding", "0"),
                ("margin", "0"),
                ("overflow", "hidden"),
            ],
            HIDE_DURATION,
        )
        .await;

        self.dom.set_style(self.binding.root, "display", "none");
        TransitionOutcome::Hidden
    }

    async fn show_alternative(&mut self) -> TransitionOutcome {
        let config = Arc::clone(&self.config);
        let Some(text) = config.alternative_text() else {
            dlog!(self.log, "No alternative text configured, leaving banner as is");
            return TransitionOutcome::NothingToShow;
        };

        self.animate_root(&[("opacity", "0")], DEFAULT_DURATION).await;

        let dom = Arc::clone(&self.dom);
        let root = self.binding.root;

        if config.uses_custom_colors() {
            let bg = config.alternative_bg_color.as_deref().unwrap_or("");
            let fg = config.alternative_text_color.as_deref().unwrap_or("");
            dlog!(self.log, "Applying alternative colors bg={:?} text={:?}", bg, fg);
            dom.set_style(root, "background-color", bg);
            dom.set_style(root, "color", fg);
            if let Some(link) = self.binding.link {
                dom.set_style(link, "color", fg);
                dom.set_style(link, "border-color", fg);
            }
        }

        if let Some(content) = self.binding.content {
            dom.set_inner_html(content, text);
        }

        if let Some(wrapper) = self.binding.countdown_wrapper {
            dom.set_style(wrapper, "display", "none");
        }

        let link = self.apply_link(&config);

        self.animate_root(&[("opacity", "1")], DEFAULT_DURATION).await;
        TransitionOutcome::Alternative { link }
    }

    fn apply_link(&mut self, config: &BannerConfig) -> LinkChange {
        let dom = &*self.dom;

        let Some(href) = config.alternative_link() else {
            return match self.binding.link {
                Some(link) => {
                    dom.set_style(link, "display", "none");
                    LinkChange::Hidden
                }
                None => LinkChange::Untouched,
            };
        };

        dlog!(self.log, "Alternative link: {}", href);
        match self.binding.link {
            Some(link) => {
                dom.set_attribute(link, "href", href);
                dom.set_text(link, config.link_text());
                dom.set_style(link, "display", "inline-block");
                if config.alternative_link_tab {
                    dom.set_attribute(link, "target", "_blank");
                    dom.set_attribute(link, "rel", "noopener noreferrer");
                } else {
                    dom.remove_attribute(link, "target");
                    dom.remove_attribute(link, "rel");
                }
                LinkChange::Updated
            }
            None => {
                let Some(inner) = self.binding.inner else {
                    dlog!(self.log, "No inner container to attach the link to");
                    return LinkChange::NoContainer;
                };

                let link = dom.create_element("a");
                dom.add_class(link, &self.binding.link_class);
                dom.set_style(link, "transition", "all 0.3s ease");
                dom.append_child(inner, link);
                dom.set_attribute(link, "href", href);
                dom.set_text(link, config.link_text());
                if config.alternative_link_tab {
                    dom.set_attribute(link, "target", "_blank");
                    dom.set_attribute(link, "rel", "noopener noreferrer");
                }
                if config.uses_custom_colors() {
                    if let Some(fg) = config.alternative_text_color.as_deref() {
                        dom.set_style(link, "color", fg);
                        dom.set_style(link, "border-color", fg);
                    }
                }

                self.binding.link = Some(link);
                LinkChange::Created
            }
        }
    }
}
