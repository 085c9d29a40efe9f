//! Frame clock
//!
//! Turns the host's monotonically increasing frame timestamps into deltas.

/// Tracks the last observed frame timestamp (ms)
#[derive(Debug, Clone, Default)]
pub struct Clock {
    last: Option<f64>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous session's timestamps
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record a frame timestamp and return ms since the previous frame.
    ///
    /// The first frame after a reset seeds the clock and yields 0. A timestamp
    /// older than the last one also yields 0 and does not move the clock back.
    pub fn tick(&mut self, timestamp: f64) -> f64 {
        let delta = match self.last {
            Some(last) => (timestamp - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(self.last.map_or(timestamp, |last| last.max(timestamp)));
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = Clock::new();
        assert_eq!(clock.tick(12_345.0), 0.0);
        assert_eq!(clock.tick(12_361.0), 16.0);
    }

    #[test]
    fn test_skipped_frame_reports_real_elapsed() {
        let mut clock = Clock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        // Two frames dropped
        assert_eq!(clock.tick(64.0), 48.0);
    }

    #[test]
    fn test_backwards_timestamp_is_ignored() {
        let mut clock = Clock::new();
        clock.tick(100.0);
        assert_eq!(clock.tick(90.0), 0.0);
        assert_eq!(clock.tick(116.0), 16.0);
    }

    #[test]
    fn test_reset_reseeds() {
        let mut clock = Clock::new();
        clock.tick(0.0);
        clock.tick(500.0);
        clock.reset();
        assert_eq!(clock.tick(10_000.0), 0.0);
        assert_eq!(clock.tick(10_016.0), 16.0);
    }
}
