//! Frame timer driving the update loop.

use std::time::{Duration, Instant};

/// Delta and total time for one frame, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Seconds since the timer started.
    pub total: f32,
}

/// High-resolution timer producing per-frame [`FrameTime`] values.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    last_tick: Instant,
}

impl Timer {
    /// Create a new timer, starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
        }
    }

    /// Get the total elapsed time since the timer was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Advance the timer by one frame.
    ///
    /// Returns the time since the previous call (or since creation for the
    /// first call) together with the total running time.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        FrameTime {
            delta: delta.as_secs_f32(),
            total: (now - self.start).as_secs_f32(),
        }
    }

    /// Reset the timer to the current time.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last_tick = now;
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_total_is_monotonic() {
        let mut timer = Timer::new();
        let first = timer.tick();
        std::thread::sleep(Duration::from_millis(2));
        let second = timer.tick();

        assert!(first.delta >= 0.0);
        assert!(second.delta > 0.0);
        assert!(second.total >= first.total);
        assert!(second.total >= second.delta);
    }

    #[test]
    fn test_reset_restarts_total() {
        let mut timer = Timer::new();
        std::thread::sleep(Duration::from_millis(2));
        timer.reset();
        let frame = timer.tick();
        assert!(frame.total >= frame.delta);
        assert!(frame.total <= timer.elapsed().as_secs_f32());
    }
}
