use crate::constants::ELAPSED_WRAP_MS;

/// Per-frame timing derived from host timestamps in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    pub delta_ms: f64,
    /// Speed-scaled accumulated time, wrapped to [0, ELAPSED_WRAP_MS).
    pub elapsed: f64,
    pub frame: u64,
}

#[derive(Clone, Debug)]
pub struct FrameClock {
    last_ms: f64,
    elapsed: f64,
    speed: f64,
    frame: u64,
}

impl FrameClock {
    pub fn new(start_ms: f64, speed: f32) -> Self {
        Self {
            last_ms: start_ms,
            elapsed: 0.0,
            speed: speed as f64,
            frame: 0,
        }
    }

    /// Advance to `now_ms`. Timestamps that go backwards count as a zero delta.
    pub fn tick(&mut self, now_ms: f64) -> FrameTime {
        let delta_ms = (now_ms - self.last_ms).max(0.0);
        self.last_ms = now_ms.max(self.last_ms);
        self.elapsed = (self.elapsed + delta_ms * self.speed).rem_euclid(ELAPSED_WRAP_MS);
        self.frame += 1;
        FrameTime {
            delta_ms,
            elapsed: self.elapsed,
            frame: self.frame,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
