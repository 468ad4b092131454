//! Countdown background task

use std::sync::Arc;
use tracing::info;

use crate::{
    countdown::{Clock, CountdownController, RunOutcome},
    dom::Dom,
    state::AppState,
    utils::debug_log,
};

/// Run the page's countdown to completion.
///
/// Returns `None` when the page has no banner or no countdown configured;
/// the widget is inert in that case and nothing is scheduled.
pub async fn countdown_task(state: Arc<AppState>, clock: Arc<dyn Clock>) -> Option<RunOutcome> {
    info!("Starting countdown task");

    let Some(binding) = state.binding.clone() else {
        info!("No banner on the page, countdown task exiting");
        return None;
    };

    let dom: Arc<dyn Dom> = state.dom.clone();
    let controller = CountdownController::init(
        Arc::clone(&state.config),
        dom,
        binding,
        clock,
        debug_log(state.config.debug_mode),
        Arc::clone(&state.status_tx),
    );
    let Some(controller) = controller else {
        info!("Countdown not configured, countdown task exiting");
        return None;
    };

    let outcome = controller.run().await;
    info!("Countdown task finished: {:?}", outcome);
    Some(outcome)
}
