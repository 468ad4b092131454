//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
};
use tracing::debug;

use crate::{
    settings::{AdminPreview, BannerConfig, SettingsForm},
    state::AppState,
};
use super::responses::{HealthResponse, StatusResponse};

/// Handle GET /status - Countdown and transition state
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let status = state.status();

    Json(StatusResponse {
        mounted: state.binding.is_some(),
        countdown_configured: status.configured,
        running: status.is_running(),
        ended: status.ended,
        remaining_seconds: status.remaining_seconds,
        display: status.display,
        clock_offset: status.clock_offset,
        transition: status.transition,
        uptime: state.get_uptime(),
        host: state.host.clone(),
        port: state.port,
    })
}

/// Handle GET /banner - Current banner markup
pub async fn banner_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, StatusCode> {
    match state.banner_html() {
        Some(html) => Ok(Html(html)),
        None => {
            debug!("Banner requested but page has no banner root");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Handle GET /config - Configuration snapshot in effect
pub async fn config_handler(State(state): State<Arc<AppState>>) -> Json<BannerConfig> {
    Json(state.config.as_ref().clone())
}

/// Handle POST /admin/preview - Field visibility and color swatches for the settings form
pub async fn admin_preview_handler(Json(form): Json<SettingsForm>) -> Json<AdminPreview> {
    debug!("Admin preview for {:?}", form);
    Json(form.preview())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
