//! Time management utilities

use std::time::{Duration, Instant};

/// Frame timer used for the end-of-run summary
pub struct Timer {
    started: Instant,
    last_frame: Instant,
    delta_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last_frame: now,
            delta_time: 0.0,
            frame_count: 0,
        }
    }

    /// Record that a frame was presented (call once per frame)
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Time since the previous tick in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Wall-clock time since the timer was created
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        let secs = self.elapsed().as_secs_f32();
        if secs > 0.0 {
            self.frame_count as f32 / secs
        } else {
            0.0
        }
    }
}
