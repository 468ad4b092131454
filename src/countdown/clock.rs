//! Wall clock access and server clock correction

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Source of the client's current Unix time, in whole seconds
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> i64;
}

/// The machine clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_secs(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// `server_time - client_time`, measured once when the widget starts.
///
/// Without a server timestamp the client clock is trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockOffset(i64);

impl ClockOffset {
    pub fn measure(server_time: Option<i64>, clock: &dyn Clock) -> Self {
        Self(server_time.map_or(0, |server| server.saturating_sub(clock.now_secs())))
    }

    pub fn seconds(self) -> i64 {
        self.0
    }

    /// Current time on the server's clock
    pub fn server_now(self, clock: &dyn Clock) -> i64 {
        clock.now_secs().saturating_add(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_corrects_any_skew() {
        let server = 1_700_000_000;
        for skew in [-86_400, -3, 0, 7, 3_600] {
            let clock = ManualClock::new(server + skew);
            let offset = ClockOffset::measure(Some(server), &clock);
            assert_eq!(offset.seconds(), -skew);

            clock.advance(125);
            assert_eq!(offset.server_now(&clock), server + 125);
        }
    }

    #[test]
    fn extreme_timestamps_saturate() {
        let clock = ManualClock::new(1_700_000_000);
        let offset = ClockOffset::measure(Some(i64::MIN), &clock);
        assert_eq!(offset.seconds(), i64::MIN);
        assert_eq!(offset.server_now(&clock), i64::MIN + 1_700_000_000);

        let clock = ManualClock::new(-10);
        let offset = ClockOffset::measure(Some(i64::MAX), &clock);
        assert_eq!(offset.seconds(), i64::MAX);
        clock.set(10);
        assert_eq!(offset.server_now(&clock), i64::MAX);
    }

    #[test]
    fn missing_server_time_trusts_client() {
        let clock = ManualClock::new(42);
        let offset = ClockOffset::measure(None, &clock);
        assert_eq!(offset.server_now(&clock), 42);
    }
}
