//! Rate limiter for map viewport events.
//!
//! A continuous drag or zoom fires "viewport changed" on every pixel of
//! movement; recomputing the pipeline for each would be wasted work. The
//! debouncer collapses a burst into a single value: every new report
//! replaces the pending one and re-arms the deadline (cancel-and-
//! reschedule), so after the quiet period only the last rectangle of the
//! burst is delivered. There is never more than one pending value, which
//! is the whole cancellation story.
//!
//! Time is passed in by the caller, so the event loop owns the clock and
//! tests never sleep.

use std::time::{Duration, Instant};

use crate::types::Bounds;

/// Quiet period after the last viewport report before it is applied.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(120);

#[derive(Debug)]
pub struct ViewportDebouncer {
    quiet_period: Duration,
    pending: Option<Bounds>,
    deadline: Option<Instant>,
}

impl ViewportDebouncer {
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            deadline: None,
        }
    }

    /// Record a viewport report. Any previously pending rectangle is
    /// discarded and the deadline restarts from `now`.
    pub fn record(&mut self, bounds: Bounds, now: Instant) {
        self.pending = Some(bounds);
        self.deadline = Some(now + self.quiet_period);
    }

    /// Take the pending rectangle if the quiet period has elapsed.
    /// Delivers each recorded burst at most once.
    pub fn poll(&mut self, now: Instant) -> Option<Bounds> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.pending.take()
    }

    /// Whether nothing is waiting to fire.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }
}

impl Default for ViewportDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(west: f64) -> Bounds {
        Bounds::new(west, west + 1.0, 50.0, 51.0)
    }

    #[test]
    fn burst_collapses_to_last_value() {
        let mut debouncer = ViewportDebouncer::default();
        let start = Instant::now();

        debouncer.record(bounds(1.0), start);
        debouncer.record(bounds(2.0), start + Duration::from_millis(10));
        debouncer.record(bounds(3.0), start + Duration::from_millis(20));

        // Still inside the quiet period of the last report.
        assert_eq!(debouncer.poll(start + Duration::from_millis(100)), None);

        let fired = debouncer.poll(start + Duration::from_millis(140));
        assert_eq!(fired, Some(bounds(3.0)));
        assert!(debouncer.is_idle());
    }

    #[test]
    fn fires_at_most_once_per_burst() {
        let mut debouncer = ViewportDebouncer::default();
        let start = Instant::now();

        debouncer.record(bounds(1.0), start);
        let late = start + Duration::from_millis(200);
        assert!(debouncer.poll(late).is_some());
        assert_eq!(debouncer.poll(late + Duration::from_millis(1)), None);
    }

    #[test]
    fn new_report_rearms_the_deadline() {
        let mut debouncer = ViewportDebouncer::new(Duration::from_millis(100));
        let start = Instant::now();

        debouncer.record(bounds(1.0), start);
        debouncer.record(bounds(2.0), start + Duration::from_millis(90));

        // 110ms after the first report but only 20ms after the second.
        assert_eq!(debouncer.poll(start + Duration::from_millis(110)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(190)),
            Some(bounds(2.0))
        );
    }

    #[test]
    fn deadline_is_edge_inclusive() {
        let mut debouncer = ViewportDebouncer::new(Duration::from_millis(100));
        let start = Instant::now();
        debouncer.record(bounds(1.0), start);
        assert!(debouncer.poll(start + Duration::from_millis(100)).is_some());
    }
}
