//! Countdown to the configured deadline
//!
//! Time is always read as `client clock + offset`, with the offset measured
//! once against the server timestamp the page was rendered with.

pub mod clock;
pub mod controller;
pub mod format;

pub use clock::{Clock, ClockOffset, ManualClock, SystemClock};
pub use controller::{CountdownController, RunOutcome};
pub use format::TimeParts;
