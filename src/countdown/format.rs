//! Remaining-time decomposition and display

use serde::{Deserialize, Serialize};

use crate::settings::Labels;

const DAY: i64 = 86_400;
const HOUR: i64 = 3_600;
const MINUTE: i64 = 60;

/// Remaining time split into whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeParts {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeParts {
    pub const ZERO: Self = Self {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Non-positive input yields [`TimeParts::ZERO`].
    pub fn from_remaining(remaining: i64) -> Self {
        if remaining <= 0 {
            return Self::ZERO;
        }
        Self {
            days: remaining / DAY,
            hours: (remaining % DAY) / HOUR,
            minutes: (remaining % HOUR) / MINUTE,
            seconds: remaining % MINUTE,
        }
    }

    /// `"<d><label> <hh><label> <mm><label>[ <ss><label>]"`
    pub fn render(&self, labels: &Labels, show_seconds: bool) -> String {
        let mut parts = vec![
            format!("{}{}", self.days, labels.days),
            format!("{:02}{}", self.hours, labels.hours),
            format!("{:02}{}", self.minutes, labels.minutes),
        ];
        if show_seconds {
            parts.push(format!("{:02}{}", self.seconds, labels.seconds));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_whole_units() {
        assert_eq!(
            TimeParts::from_remaining(90_065),
            TimeParts {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 5
            }
        );
        assert_eq!(TimeParts::from_remaining(-10), TimeParts::ZERO);
    }

    #[test]
    fn days_are_not_padded() {
        let parts = TimeParts::from_remaining(123 * DAY + 4 * HOUR + 5 * MINUTE + 6);
        assert_eq!(parts.render(&Labels::default(), true), "123d 04h 05m 06s");
    }

    #[test]
    fn seconds_term_only_when_enabled() {
        let labels = Labels::default();
        for remaining in [1, 59, 60, 3_599, 86_399, 90_065, 10 * DAY + 1] {
            let text = TimeParts::from_remaining(remaining).render(&labels, false);
            assert_eq!(text.split(' ').count(), 3, "{text}");
            assert!(!text.ends_with('s'), "{text}");
        }
    }

    #[test]
    fn custom_labels_are_suffixes() {
        let labels = Labels {
            days: " días".into(),
            hours: " h".into(),
            minutes: " min".into(),
            seconds: " seg".into(),
        };
        let text = TimeParts::ZERO.render(&labels, true);
        assert_eq!(text, "0 días 00 h 00 min 00 seg");
    }
}
