//! State management module
//! 
//! Shared host state and the countdown status the controller publishes.

pub mod app_state;
pub mod countdown_status;

// Re-export main types
pub use app_state::AppState;
pub use countdown_status::CountdownStatus;
