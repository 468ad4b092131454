//! Countdown status published by the controller

use serde::Serialize;

use crate::transition::TransitionReport;

/// Latest view of the countdown, as seen by observers of the widget
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountdownStatus {
    /// A countdown node and a deadline were both present at start
    pub configured: bool,
    pub ended: bool,
    pub remaining_seconds: Option<i64>,
    /// Text currently shown in the countdown node
    pub display: Option<String>,
    /// Server-minus-client offset measured at start
    pub clock_offset: Option<i64>,
    pub transition: Option<TransitionReport>,
}

impl CountdownStatus {
    pub fn is_running(&self) -> bool {
        self.configured && !self.ended
    }
}
