//! Countdown controller: deadline tracking, the 1 s tick and the one-shot finish

use std::{ops::ControlFlow, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{
    sync::watch,
    time::{interval_at, Instant, MissedTickBehavior},
};

use super::{
    clock::{Clock, ClockOffset},
    format::TimeParts,
};
use crate::{
    dlog,
    dom::{Dom, DomBinding, NodeId},
    settings::{BannerConfig, FinishAction},
    state::CountdownStatus,
    transition::TransitionEngine,
    utils::DebugLog,
};

const TICK: Duration = Duration::from_secs(1);

/// How [`CountdownController::run`] ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The deadline had already passed at start; no tick loop was started
    ExpiredAtStart,
    /// The deadline passed while ticking
    Finished { ticks: u64 },
}

/// Keeps the countdown text current and fires the transition exactly once.
///
/// `tick` takes `&mut self`, so a tick can never overlap another tick or an
/// in-flight transition.
pub struct CountdownController {
    config: Arc<BannerConfig>,
    dom: Arc<dyn Dom>,
    clock: Arc<dyn Clock>,
    log: Arc<dyn DebugLog>,
    countdown: NodeId,
    target: i64,
    offset: ClockOffset,
    ended: bool,
    engine: TransitionEngine,
    status: Arc<watch::Sender<CountdownStatus>>,
}

impl CountdownController {
    /// Returns `None` when the page has no countdown node or no usable
    /// deadline; that page simply has no countdown.
    pub fn init(
        config: Arc<BannerConfig>,
        dom: Arc<dyn Dom>,
        binding: DomBinding,
        clock: Arc<dyn Clock>,
        log: Arc<dyn DebugLog>,
        status: Arc<watch::Sender<CountdownStatus>>,
    ) -> Option<Self> {
        let Some(countdown) = binding.countdown else {
            dlog!(log, "Countdown node not found");
            return None;
        };
        let Some(target) = config.deadline() else {
            dlog!(log, "No countdown target configured");
            return None;
        };

        let offset = ClockOffset::measure(config.server_time, &*clock);
        log_start(&*log, &config, &*clock, target, offset);

        let engine = TransitionEngine::new(
            Arc::clone(&dom),
            binding,
            Arc::clone(&config),
            Arc::clone(&log),
        );

        status.send_modify(|s| {
            s.configured = true;
            s.clock_offset = Some(offset.seconds());
        });

        Some(Self {
            config,
            dom,
            clock,
            log,
            countdown,
            target,
            offset,
            ended: false,
            engine,
            status,
        })
    }

    /// Seconds until the deadline on the server's clock
    pub fn remaining(&self) -> i64 {
        self.target.saturating_sub(self.offset.server_now(&*self.clock))
    }

    pub fn offset(&self) -> ClockOffset {
        self.offset
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// How many times the transition engine has been started
    pub fn transitions_run(&self) -> u32 {
        self.engine.runs()
    }

    /// Drive the countdown until the deadline passes and the transition settles.
    pub async fn run(mut self) -> RunOutcome {
        let remaining = self.remaining();
        dlog!(self.log, "Remaining at start: {}s", remaining);

        if remaining <= 0 {
            dlog!(self.log, "Deadline already passed, finishing immediately");
            self.finish().await;
            return RunOutcome::ExpiredAtStart;
        }

        if self.tick().await.is_break() {
            return RunOutcome::Finished { ticks: 0 };
        }

        let mut interval = interval_at(Instant::now() + TICK, TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0;
        loop {
            interval.tick().await;
            ticks += 1;
            if self.tick().await.is_break() {
                break;
            }
        }
        RunOutcome::Finished { ticks }
    }

    /// One countdown step. Breaks once the countdown is over; every call
    /// after that is a no-op.
    pub async fn tick(&mut self) -> ControlFlow<()> {
        if self.ended {
            return ControlFlow::Break(());
        }

        let remaining = self.remaining();
        if remaining <= 0 {
            self.finish().await;
            return ControlFlow::Break(());
        }

        let parts = TimeParts::from_remaining(remaining);
        dlog!(
            self.log,
            "Countdown: {}d {}h {}m {}s ({}s left)",
            parts.days,
            parts.hours,
            parts.minutes,
            parts.seconds,
            remaining
        );
        self.render(parts, remaining);
        ControlFlow::Continue(())
    }

    async fn finish(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        dlog!(self.log, "Countdown finished, action: {:?}", self.config.finish_action);

        self.render(TimeParts::ZERO, 0);
        self.status.send_modify(|s| s.ended = true);

        let report = self.engine.run().await;
        self.status.send_modify(|s| s.transition = Some(report));
    }

    fn render(&self, parts: TimeParts, remaining: i64) {
        let text = parts.render(&self.config.labels, self.config.show_seconds);
        self.dom.set_text(self.countdown, &text);
        self.status.send_modify(|s| {
            s.remaining_seconds = Some(remaining.max(0));
            s.display = Some(text);
        });
    }
}

fn log_start(
    log: &dyn DebugLog,
    config: &BannerConfig,
    clock: &dyn Clock,
    target: i64,
    offset: ClockOffset,
) {
    let fmt_ts = |secs: i64| {
        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| secs.to_string())
    };
    let client = clock.now_secs();

    dlog!(log, "Countdown target: {} ({})", fmt_ts(target), target);
    if let Some(server) = config.server_time {
        dlog!(log, "Server time: {}", fmt_ts(server));
    }
    dlog!(log, "Client time: {}", fmt_ts(client));
    dlog!(log, "Clock offset (server - client): {}s", offset.seconds());
    dlog!(log, "Finish action: {:?}", config.finish_action);
    if config.finish_action == FinishAction::ShowAlternative {
        dlog!(
            log,
            "Alternative text: {}, link: {}, custom colors: {}",
            if config.alternative_text().is_some() { "set" } else { "unset" },
            config.alternative_link().unwrap_or("unset"),
            config.uses_custom_colors()
        );
    }
}
