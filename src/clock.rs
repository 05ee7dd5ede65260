//! Timing collaborator: current session time, per-tick elapsed time and
//! frame pacing.

use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Milliseconds since the clock was created.
    fn now_ms(&self) -> u64;

    /// Wait out the remainder of the current frame, then report how many
    /// milliseconds passed since the previous call.
    fn tick(&mut self) -> u64;
}

/// Wall-clock pacing at a fixed frame rate.
///
/// Elapsed time is measured against the session start, so the per-tick
/// deltas always add up to `now_ms()` and no sub-millisecond remainder is lost.
pub struct FrameClock {
    frame: Duration,
    start: Instant,
    last: Instant,
    last_ms: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let now = Instant::now();
        FrameClock {
            frame: Duration::from_secs(1) / fps.max(1),
            start: now,
            last: now,
            last_ms: 0,
        }
    }
}

impl Clock for FrameClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn tick(&mut self) -> u64 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.last = Instant::now();
        let now = self.now_ms();
        let dt = now - self.last_ms;
        self.last_ms = now;
        dt
    }
}

/// A clock that advances by a fixed step per tick and never sleeps.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: u64,
    step: u64,
}

impl ManualClock {
    pub fn new(step_ms: u64) -> Self {
        ManualClock { now: 0, step: step_ms }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn tick(&mut self) -> u64 {
        self.now += self.step;
        self.step
    }
}
