/*
 * Realtime Module
 *
 * Turns a host repaint callback into a rate-limited tick. The host calls
 * `poll` once per repaint with the current time; a tick is accepted once at
 * least one target interval has elapsed since the previous accepted tick.
 *
 * The remainder of the elapsed time modulo the interval is carried into the
 * next measurement so the long-run tick rate does not drift. The `dt` handed
 * out is the real elapsed time, not the fixed interval.
 */

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Time between ticks at `target_fps`, rounded to the nanosecond.
/// Rates above 2e9 round to zero, which `poll` never accepts.
pub fn frame_interval(target_fps: f32) -> Duration {
    Duration::from_nanos((1.0e9 / f64::from(target_fps)).round() as u64)
}

// What an accepted frame hands to the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub dt: f32,
    pub fps: u32,
}

pub struct RealtimeUpdate {
    interval: Duration,
    last_tick: Instant,
    // Rolling one-second window for the fps readout
    window_elapsed: Duration,
    window_frames: u32,
    fps: u32,
}

impl RealtimeUpdate {
    pub fn new(target_fps: f32, start: Instant) -> Self {
        Self {
            interval: frame_interval(target_fps),
            last_tick: start,
            window_elapsed: Duration::ZERO,
            window_frames: 0,
            fps: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    // Most recently measured frames per second (0 until the first window closes)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Offer a repaint at `now`. Returns the tick to run, or `None` if the frame is too early.
    pub fn poll(&mut self, now: Instant) -> Option<FrameTick> {
        let elapsed = now.saturating_duration_since(self.last_tick);
        if elapsed < self.interval || self.interval.is_zero() {
            return None;
        }

        self.window_elapsed += elapsed;
        self.window_frames += 1;
        if self.window_elapsed >= FPS_WINDOW {
            self.fps = (self.window_frames as f32 / self.window_elapsed.as_secs_f32()).round() as u32;
            self.window_elapsed = Duration::ZERO;
            self.window_frames = 0;
        }

        let remainder = elapsed.as_nanos() % self.interval.as_nanos();
        self.last_tick = now - Duration::from_nanos(remainder as u64);

        Some(FrameTick {
            dt: elapsed.as_secs_f32(),
            fps: self.fps,
        })
    }
}
