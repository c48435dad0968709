//! Frame clock with clamped delta time

use std::time::Instant;

/// Longest frame the clock will report, in seconds
pub const MAX_DELTA: f64 = 0.25;

/// Snapshot of the clock handed to every per-frame update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTick {
    /// Elapsed time since the clock started, in seconds
    pub time: f32,
    /// Time since the previous frame, in seconds
    pub delta: f32,
    /// Frame counter, starting at 0
    pub frame: u64,
}

/// Tracks elapsed and per-frame time.
///
/// `tick` reads the wall clock for interactive hosts; `advance` steps by a
/// given amount for headless runs and tests. Both clamp the delta so a stalled
/// frame cannot fast-forward every animation at once.
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Frames advanced so far
    pub frame: u64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame: 0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from the wall clock. Call once per frame.
    pub fn tick(&mut self) -> FrameTick {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return self.snapshot();
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed)
    }

    /// Advance by a fixed amount of time
    pub fn advance(&mut self, dt: f64) -> FrameTick {
        self.delta_time = dt.clamp(0.0, MAX_DELTA);
        self.total_time += self.delta_time;
        self.frame += 1;
        self.first_tick = false;
        self.snapshot()
    }

    pub fn snapshot(&self) -> FrameTick {
        FrameTick {
            time: self.total_time as f32,
            delta: self.delta_time as f32,
            frame: self.frame,
        }
    }
}
