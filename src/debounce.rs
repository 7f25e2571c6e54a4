use std::time::{Duration, Instant};

/// Coalesces a burst of triggers into a single firing.
///
/// Each trigger re-arms the deadline, superseding any pending one, so
/// N triggers inside the window produce exactly one firing once the
/// burst has quieted. Time is passed in explicitly so the event loop
/// owns the clock.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Arm (or re-arm) the deadline `interval` after `now`.
    pub fn trigger_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    /// True once per armed burst: reports whether the deadline has
    /// passed and disarms it.
    pub fn fire_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }

    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Remaining wait, used as the event-loop poll timeout so a pending
    /// deadline is serviced promptly.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_triggers_fires_once() {
        let mut d = Debouncer::from_millis(100);
        let t0 = Instant::now();

        // five "resize events" inside the window
        for ms in [0u64, 10, 20, 30, 40] {
            d.trigger_at(t0 + Duration::from_millis(ms));
        }

        // not yet quiet at 90ms
        assert!(!d.fire_at(t0 + Duration::from_millis(90)));
        // quiet for the full interval after the last trigger
        assert!(d.fire_at(t0 + Duration::from_millis(140)));
        // disarmed: no second firing
        assert!(!d.fire_at(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn unarmed_never_fires() {
        let mut d = Debouncer::from_millis(100);
        assert!(!d.fire_at(Instant::now() + Duration::from_secs(10)));
        assert!(!d.pending());
    }

    #[test]
    fn later_trigger_supersedes_earlier() {
        let mut d = Debouncer::from_millis(100);
        let t0 = Instant::now();

        d.trigger_at(t0);
        d.trigger_at(t0 + Duration::from_millis(90));

        // the first deadline (t0+100) must not fire
        assert!(!d.fire_at(t0 + Duration::from_millis(100)));
        assert!(d.fire_at(t0 + Duration::from_millis(190)));
    }

    #[test]
    fn time_left_counts_down() {
        let mut d = Debouncer::from_millis(100);
        let t0 = Instant::now();
        assert_eq!(d.time_left(t0), None);

        d.trigger_at(t0);
        assert_eq!(d.time_left(t0 + Duration::from_millis(40)), Some(Duration::from_millis(60)));
        assert_eq!(d.time_left(t0 + Duration::from_millis(200)), Some(Duration::ZERO));
    }
}
