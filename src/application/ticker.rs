// Cancellable repeating timer driving refresh checks
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// A repeating timer whose period can change between ticks.
///
/// A stopped ticker never fires. `reset` reschedules the next tick one full
/// period from now, the way a restarted interval would.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    /// Create a stopped ticker.
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    pub fn start(&mut self) {
        self.next = Some(Instant::now() + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Change the period and restart the countdown. Stays stopped if stopped.
    pub fn reset(&mut self, period: Duration) {
        self.period = period;
        if self.is_running() {
            self.start();
        }
    }

    /// Wait for the next tick. Pending forever while stopped.
    ///
    /// Cancel-safe: dropping the future before it completes leaves the
    /// schedule untouched.
    pub async fn tick(&mut self) -> Instant {
        let Some(deadline) = self.next else {
            return std::future::pending().await;
        };

        sleep_until(deadline).await;
        // Missed ticks are skipped rather than replayed in a burst
        let now = Instant::now();
        let mut next = deadline + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.next = Some(next);
        deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_period() {
        let mut ticker = Ticker::new(Duration::from_secs(5));
        let start = Instant::now();
        ticker.start();

        let first = ticker.tick().await;
        let second = ticker.tick().await;

        assert_eq!(first - start, Duration::from_secs(5));
        assert_eq!(second - start, Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_ticker_never_fires() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        ticker.start();
        ticker.stop();

        let fired = timeout(Duration::from_secs(60), ticker.tick()).await;
        assert!(fired.is_err());
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_restarts_countdown_with_new_period() {
        let mut ticker = Ticker::new(Duration::from_secs(300));
        ticker.start();

        advance(Duration::from_secs(100)).await;
        let reset_at = Instant::now();
        ticker.reset(Duration::from_secs(3));

        let fired = ticker.tick().await;
        assert_eq!(fired - reset_at, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_keeps_stopped_ticker_stopped() {
        let mut ticker = Ticker::new(Duration::from_secs(300));
        ticker.reset(Duration::from_secs(3));
        assert!(!ticker.is_running());
    }
}
