//! Player state management
//!
//! Holds the host-side state of the interactive player: the mapping from
//! wall clock to engine time (pause and speed), and UI toggles.

use std::time::{Duration, Instant};

use crate::config::{clamp_speed, MAX_SPEED, MIN_SPEED};

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the
/// main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player
    Quit,
}

/// Host-side state of the interactive player.
#[derive(Debug)]
pub struct PlayerState {
    /// Whether the engine clock is frozen
    pub paused: bool,
    /// Engine milliseconds per wall millisecond
    pub speed: f64,
    /// Wall clock time when playback started/resumed or speed changed
    pub start_time: Instant,
    /// Engine time at `start_time`
    pub time_offset: Duration,
    /// Whether the help overlay is visible
    pub show_help: bool,
    /// True when the screen needs to be redrawn
    pub needs_render: bool,
}

impl PlayerState {
    /// Redraw interval while something animates, and the longest poll wait.
    pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

    /// Speed change factor for `+` / `-`.
    const SPEED_STEP: f64 = 1.5;

    pub fn new(speed: f64) -> Self {
        Self {
            paused: false,
            speed: clamp_speed(speed),
            start_time: Instant::now(),
            time_offset: Duration::ZERO,
            show_help: false,
            needs_render: true,
        }
    }

    /// Engine time now.
    pub fn engine_time(&self) -> Duration {
        self.engine_time_at(Instant::now())
    }

    /// Engine time at wall clock instant `now`.
    pub fn engine_time_at(&self, now: Instant) -> Duration {
        if self.paused {
            return self.time_offset;
        }
        let wall = now.saturating_duration_since(self.start_time);
        self.time_offset + scale(wall, self.speed)
    }

    /// Start measuring from `now` without changing engine time.
    fn rebase(&mut self, now: Instant) {
        self.time_offset = self.engine_time_at(now);
        self.start_time = now;
    }

    /// Toggle pause.
    pub fn toggle_pause(&mut self) {
        self.toggle_pause_at(Instant::now());
    }

    pub fn toggle_pause_at(&mut self, now: Instant) {
        self.rebase(now);
        self.paused = !self.paused;
        self.needs_render = true;
    }

    /// Increase playback speed (max 16x).
    pub fn speed_up(&mut self) {
        self.set_speed_at(self.speed * Self::SPEED_STEP, Instant::now());
    }

    /// Decrease playback speed (min 0.1x).
    pub fn speed_down(&mut self) {
        self.set_speed_at(self.speed / Self::SPEED_STEP, Instant::now());
    }

    pub fn set_speed_at(&mut self, speed: f64, now: Instant) {
        self.rebase(now);
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
        self.needs_render = true;
    }

    /// Toggle help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.needs_render = true;
    }

    /// How long the main loop may block waiting for input.
    ///
    /// Wakes in time for the next engine deadline, converted to wall time
    /// at the current speed, and at least every frame interval.
    pub fn poll_timeout(&self, engine_now: Duration, next_deadline: Option<Duration>) -> Duration {
        if self.paused {
            return Self::FRAME_INTERVAL;
        }
        match next_deadline {
            Some(deadline) => {
                scale(deadline.saturating_sub(engine_now), 1.0 / self.speed).min(Self::FRAME_INTERVAL)
            }
            None => Self::FRAME_INTERVAL,
        }
    }
}

/// Multiply a duration by `factor`, rounding to the nearest nanosecond.
fn scale(duration: Duration, factor: f64) -> Duration {
    // Float-to-int casts saturate, so this cannot panic
    Duration::from_nanos((duration.as_nanos() as f64 * factor).round() as u64)
}
