// Refresh scheduling - tick cadence and staleness decisions
use crate::application::duration_cache::DurationCache;
use crate::domain::fee_history::ChartDuration;
use std::time::Duration;
use tokio::time::Instant;

/// Freshness window, and the tick cadence while the last attempt succeeded
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Tick cadence after a failed attempt
pub const RETRY_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshInterval {
    Normal,
    Retry,
}

impl RefreshInterval {
    pub fn period(&self) -> Duration {
        match self {
            RefreshInterval::Normal => UPDATE_INTERVAL,
            RefreshInterval::Retry => RETRY_INTERVAL,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    interval: RefreshInterval,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self {
            interval: RefreshInterval::Normal,
        }
    }

    pub fn interval(&self) -> RefreshInterval {
        self.interval
    }

    /// Whether `duration` should be fetched now.
    ///
    /// Always measured against [`UPDATE_INTERVAL`]: the retry cadence only makes
    /// the next check happen sooner, it does not shorten the freshness window.
    pub fn is_due(&self, cache: &DurationCache, duration: ChartDuration, now: Instant) -> bool {
        cache.is_stale(duration, now, UPDATE_INTERVAL)
    }

    /// Returns `true` if the interval changed.
    pub fn record_success(&mut self) -> bool {
        self.switch_to(RefreshInterval::Normal)
    }

    /// Returns `true` if the interval changed.
    pub fn record_failure(&mut self) -> bool {
        self.switch_to(RefreshInterval::Retry)
    }

    fn switch_to(&mut self, interval: RefreshInterval) -> bool {
        if self.interval == interval {
            return false;
        }
        tracing::info!(
            "Refresh interval switched from {:?} to {:?} ({:?})",
            self.interval,
            interval,
            interval.period()
        );
        self.interval = interval;
        true
    }
}
