//! Demo playback position source: wall-clock time since process start.
//!
//! A real host would read the playing media surface instead; this keeps the
//! binary self-contained for trying the engine against live tracks.

use std::time::Instant;

use dualsub_engine::PositionSource;

pub struct WallClock {
    started: Instant,
}

impl Default for WallClock {
    fn default() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl PositionSource for WallClock {
    fn current_time(&self) -> Option<f64> {
        Some(self.started.elapsed().as_secs_f64())
    }
}
