//! Utility functions module
//! 
//! Shutdown signal handling and the widget's debug log.

pub mod debug_log;
pub mod signals;

// Re-export main functions
pub use debug_log::{debug_log, DebugLog, NoopLog, TracingLog};
pub use signals::shutdown_signal;
