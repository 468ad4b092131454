//! Widget settings
//!
//! The configuration snapshot the widget consumes, the page fixture the host
//! loads it from, and the admin panel preview rules.

pub mod admin;
pub mod page;
pub mod snapshot;

use thiserror::Error;

pub use admin::{AdminPreview, SettingsForm};
pub use page::{BannerMarkup, PageConfig};
pub use snapshot::{BannerConfig, ColorsMode, FinishAction, Labels};

/// Errors raised while loading settings from disk
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse page fixture: {0}")]
    Parse(#[from] serde_json::Error),
}
