//! Cancellable timed-mode clock.
//!
//! While cancelled, [`TickClock::tick`] never resolves, so a driver loop can
//! always select on it and a cancelled clock can never deliver a tick.

use std::future;
use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

#[derive(Debug)]
pub struct TickClock {
    period: Duration,
    interval: Option<Interval>,
}

impl TickClock {
    /// A stopped clock. Zero periods are raised to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// (Re)start the clock; the first tick fires one period from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        log::debug!("tick clock started ({:?})", self.period);
    }

    pub fn cancel(&mut self) {
        if self.interval.take().is_some() {
            log::debug!("tick clock cancelled");
        }
    }

    /// Start or cancel so the clock runs exactly when `should_run` holds.
    pub fn sync(&mut self, should_run: bool) {
        match (should_run, self.is_running()) {
            (true, false) => self.start(),
            (false, true) => self.cancel(),
            _ => {}
        }
    }

    /// Wait for the next tick. Pending forever while cancelled.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending::<()>().await,
        }
    }
}
