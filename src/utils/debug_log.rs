//! Widget diagnostics, switched on by the page's debug flag

use std::{fmt, sync::Arc};

/// Sink for widget decision points and timestamps
pub trait DebugLog: Send + Sync {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Discards everything; the widget is silent unless debugging is requested
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLog;

impl DebugLog for NoopLog {
    fn log(&self, _args: fmt::Arguments<'_>) {}
}

/// Forwards diagnostics to `tracing` on the `countdown_notice::debug` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl DebugLog for TracingLog {
    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::info!(target: "countdown_notice::debug", "{}", args);
    }
}

/// Pick the sink for a page's debug flag
pub fn debug_log(enabled: bool) -> Arc<dyn DebugLog> {
    if enabled {
        Arc::new(TracingLog)
    } else {
        Arc::new(NoopLog)
    }
}

/// `dlog!(log, "fmt", args..)` writes to a [`DebugLog`] without building a
/// `String` when the sink is a no-op.
#[macro_export]
macro_rules! dlog {
    ($log:expr, $($arg:tt)+) => {
        $crate::utils::DebugLog::log(&*$log, format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct RecordingLog {
        lines: Mutex<Vec<String>>,
    }

    impl DebugLog for RecordingLog {
        fn log(&self, args: fmt::Arguments<'_>) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(args.to_string());
            }
        }
    }

    #[test]
    fn dlog_formats_into_the_sink() {
        let log = Arc::new(RecordingLog::default());
        crate::dlog!(log, "offset {}s", -12);
        assert_eq!(*log.lines.lock().unwrap(), vec!["offset -12s".to_string()]);
    }

    #[test]
    fn disabled_flag_selects_silent_sink() {
        // Nothing observable to assert on beyond not panicking.
        crate::dlog!(debug_log(false), "dropped {}", 1);
        crate::dlog!(debug_log(true), "emitted {}", 2);
    }
}
