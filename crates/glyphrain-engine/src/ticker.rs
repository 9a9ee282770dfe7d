//! Fixed-rate tick scheduling.

use std::time::{Duration, Instant};

/// Decides when the next engine tick is due.
///
/// The ticker holds no clock of its own; the host passes `now` in. A host
/// that falls behind gets one tick and a fresh deadline, never a burst of
/// catch-up ticks.
#[derive(Debug, Clone)]
pub struct FixedTicker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl FixedTicker {
    /// Create a stopped ticker firing every `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the ticker is armed.
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Arm the ticker so the first tick is due one interval from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Disarm the ticker until the next [`start`](Self::start).
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Whether a tick is due at `now`. Consumes the tick when it is.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    /// Time until the next tick, or `None` when stopped.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    #[test]
    fn test_stopped_ticker_never_fires() {
        let mut ticker = FixedTicker::new(INTERVAL);
        let now = Instant::now();
        assert!(!ticker.is_running());
        assert!(!ticker.poll(now + INTERVAL * 10));
        assert_eq!(ticker.timeout(now), None);
    }

    #[test]
    fn test_fires_on_cadence() {
        let mut ticker = FixedTicker::new(INTERVAL);
        let start = Instant::now();
        ticker.start(start);

        assert!(!ticker.poll(start + Duration::from_millis(10)));
        assert!(ticker.poll(start + INTERVAL));
        assert!(!ticker.poll(start + INTERVAL));
        assert_eq!(ticker.timeout(start + INTERVAL), Some(INTERVAL));
        assert!(ticker.poll(start + INTERVAL * 2 + Duration::from_millis(1)));
        // Next deadline stays on the original grid.
        assert_eq!(ticker.timeout(start + INTERVAL * 2), Some(INTERVAL));
    }

    #[test]
    fn test_no_catch_up_after_stall() {
        let mut ticker = FixedTicker::new(INTERVAL);
        let start = Instant::now();
        ticker.start(start);

        let late = start + INTERVAL * 10;
        assert!(ticker.poll(late));
        assert!(!ticker.poll(late));
        assert_eq!(ticker.timeout(late), Some(INTERVAL));
    }

    #[test]
    fn test_stop_and_restart() {
        let mut ticker = FixedTicker::new(INTERVAL);
        let start = Instant::now();
        ticker.start(start);
        ticker.stop();
        assert!(!ticker.poll(start + INTERVAL));

        let resumed = start + INTERVAL * 5;
        ticker.start(resumed);
        assert!(!ticker.poll(resumed));
        assert!(ticker.poll(resumed + INTERVAL));
    }
}
