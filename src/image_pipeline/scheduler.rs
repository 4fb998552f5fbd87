//! Cooperative debouncing of regeneration requests
//!
//! Each pipeline owns one [`Debouncer`]. A request overwrites whatever was
//! pending and restarts the quiescence window; the pipeline regenerates once
//! the window has elapsed with no newer request. Time is passed in explicitly
//! so the owner drives flushing from its own loop.

use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending_since: Option<Instant>,
    coalesced: u32,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending_since: None,
            coalesced: 0,
        }
    }

    /// Records a request made at `now`, replacing any pending one.
    pub fn request(&mut self, now: Instant) {
        if self.pending_since.is_some() {
            self.coalesced += 1;
        }
        self.pending_since = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Instant at which the pending request becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending_since.map(|since| since + self.delay)
    }

    /// If the pending request is due at `now`, clears the slot and returns
    /// how many earlier requests it superseded.
    pub fn take_due(&mut self, now: Instant) -> Option<u32> {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                let coalesced = self.coalesced;
                self.cancel();
                Some(coalesced)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending_since = None;
        self.coalesced = 0;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        debouncer.request(start);

        assert_eq!(debouncer.take_due(start + Duration::from_millis(99)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.take_due(start + Duration::from_millis(100)), Some(0));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_burst_restarts_window_and_coalesces() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(100));

        for step in 0..5 {
            debouncer.request(start + Duration::from_millis(step * 50));
        }

        assert_eq!(debouncer.take_due(start + Duration::from_millis(250)), None);
        assert_eq!(debouncer.take_due(start + Duration::from_millis(300)), Some(4));
        assert_eq!(debouncer.take_due(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_cancel_drops_pending_request() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();

        debouncer.request(start);
        debouncer.cancel();

        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.take_due(start + Duration::from_secs(1)), None);
    }
}
