//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transition::TransitionReport;

/// Widget status with host metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// The page carries a banner root
    pub mounted: bool,
    pub countdown_configured: bool,
    pub running: bool,
    pub ended: bool,
    pub remaining_seconds: Option<i64>,
    pub display: Option<String>,
    pub clock_offset: Option<i64>,
    pub transition: Option<TransitionReport>,
    pub uptime: String,
    pub host: String,
    pub port: u16,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
