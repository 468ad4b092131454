//! Countdown Notice - a topbar banner counting down to a deadline
//! 
//! The widget keeps a countdown synchronised with the server clock and,
//! once the deadline passes, runs its finish action exactly once: collapse
//! the banner, or swap in alternative content with an animated fade. The
//! document is reached through the [`dom::Dom`] trait; [`dom::MemoryDom`]
//! backs the headless host and the tests.

pub mod config;
pub mod settings;
pub mod dom;
pub mod countdown;
pub mod transition;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use settings::{BannerConfig, PageConfig};
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
