// Save scheduling
// Coalesces rapid geometry changes into one deferred save

use std::time::{Duration, Instant};

/// Quiet period after the last change before a debounced save fires.
pub const QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Debounces continuous changes (drag, resize, rotate) into a single save
/// after a quiet period; each new change restarts the countdown. Discrete
/// actions bypass the timer entirely via `flush`.
#[derive(Debug, Default)]
pub struct SaveScheduler {
    deadline: Option<Instant>,
}

impl SaveScheduler {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Record a continuous change; the pending save moves to `now + quiet`.
    pub fn note_change(&mut self, now: Instant) {
        self.deadline = Some(now + QUIET_PERIOD);
    }

    /// Returns true exactly once when a pending save has become due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Cancel any pending debounced save; the caller saves immediately.
    pub fn flush(&mut self) {
        self.deadline = None;
    }

    #[allow(dead_code)]
    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_produces_single_save() {
        let start = Instant::now();
        let mut scheduler = SaveScheduler::new();

        // Ten changes 50ms apart, all within each other's quiet period.
        let mut last = start;
        for i in 0..10 {
            last = start + Duration::from_millis(i * 50);
            scheduler.note_change(last);
            assert!(!scheduler.poll(last));
        }

        assert!(!scheduler.poll(last + QUIET_PERIOD - Duration::from_millis(1)));
        assert!(scheduler.poll(last + QUIET_PERIOD));
        // Fired once; nothing further is pending.
        assert!(!scheduler.poll(last + QUIET_PERIOD * 2));
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_each_change_restarts_timer() {
        let start = Instant::now();
        let mut scheduler = SaveScheduler::new();
        scheduler.note_change(start);
        let second = start + Duration::from_millis(400);
        scheduler.note_change(second);
        // The first deadline has passed but was replaced.
        assert!(!scheduler.poll(start + QUIET_PERIOD));
        assert!(scheduler.poll(second + QUIET_PERIOD));
    }

    #[test]
    fn test_flush_cancels_pending() {
        let start = Instant::now();
        let mut scheduler = SaveScheduler::new();
        scheduler.note_change(start);
        assert!(scheduler.has_pending());
        scheduler.flush();
        assert!(!scheduler.has_pending());
        assert!(!scheduler.poll(start + QUIET_PERIOD * 2));
    }

    #[test]
    fn test_idle_never_fires() {
        let mut scheduler = SaveScheduler::new();
        assert!(!scheduler.poll(Instant::now() + Duration::from_secs(60)));
    }
}
