//! Animated style changes that settle on a native event or a fallback timer

use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;

use crate::dom::{Dom, NodeId};

/// Duration used when a step does not ask for one
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// Extra wait past the declared duration before giving up on the native event
pub const FALLBACK_GRACE: Duration = Duration::from_millis(100);

/// What ended the wait for an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Settled {
    TransitionEnd,
    Fallback,
}

/// `"opacity 300ms ease-in-out, height 300ms ease-in-out"` for the given properties
pub fn transition_declaration(properties: &[(&str, &str)], duration: Duration) -> String {
    properties
        .iter()
        .map(|(prop, _)| format!("{} {}ms ease-in-out", prop, duration.as_millis()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply `properties` to `node` with a transition over exactly those properties
/// and wait until it settles.
///
/// Completes on the node's transition-finished notification or after
/// `duration + FALLBACK_GRACE`, whichever comes first.
pub async fn animate(
    dom: &dyn Dom,
    node: NodeId,
    properties: &[(&str, &str)],
    duration: Duration,
) -> Settled {
    let finished = dom.transition_end(node);

    dom.set_style(node, "transition", &transition_declaration(properties, duration));
    for (prop, value) in properties {
        dom.set_style(node, prop, value);
    }

    tokio::select! {
        _ = finished => Settled::TransitionEnd,
        _ = sleep(duration + FALLBACK_GRACE) => Settled::Fallback,
    }
}
