//! # Frame timing
//!
//! Measures the time between rendered frames. The delta drives interaction
//! timers (notifications, damped movement) and a rolling average feeds the
//! FPS overlay. Deltas are reported as measured; consumers that integrate
//! motion cap them themselves.
//!
//! ```rust
//! use std::time::Duration;
//! use roomwalk::performance::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.record(Duration::from_millis(20));
//! clock.record(Duration::from_millis(20));
//! assert!((clock.fps() - 50.0).abs() < 0.01);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub struct FrameClock {
    last_tick: Instant,
    /// Ring buffer of recent frame times for averaging
    frame_times: VecDeque<Duration>,
    max_samples: usize,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_samples(120) // ~2 seconds at 60fps
    }

    pub fn with_samples(max_samples: usize) -> Self {
        Self {
            last_tick: Instant::now(),
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
        }
    }

    /// Marks the start of a new frame and returns the time since the previous one
    pub fn tick(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now - self.last_tick;
        self.last_tick = now;
        self.record(delta)
    }

    /// Adds a frame time sample and returns it
    pub fn record(&mut self, frame_time: Duration) -> Duration {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
        frame_time
    }

    pub fn average_frame_time(&self) -> Duration {
        if self.frame_times.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.frame_times.iter().sum();
        total / self.frame_times.len() as u32
    }

    pub fn fps(&self) -> f32 {
        let average = self.average_frame_time().as_secs_f32();
        if average > 0.0 {
            1.0 / average
        } else {
            0.0
        }
    }

    /// Compact FPS readout in the top-right corner
    pub fn render_overlay(&self, ui: &imgui::Ui) {
        let display_size = ui.io().display_size;

        ui.window("FPS")
            .size([120.0, 60.0], imgui::Condition::Always)
            .position([display_size[0] - 130.0, 10.0], imgui::Condition::Always)
            .no_decoration()
            .no_inputs()
            .bg_alpha(0.3)
            .build(|| {
                ui.text(format!("FPS: {:.0}", self.fps()));
                ui.text(format!(
                    "{:.1}ms",
                    self.average_frame_time().as_secs_f32() * 1000.0
                ));
            });
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clock_reports_zero() {
        let clock = FrameClock::new();
        assert_eq!(clock.fps(), 0.0);
        assert_eq!(clock.average_frame_time(), Duration::ZERO);
    }

    #[test]
    fn test_rolling_window_drops_old_samples() {
        let mut clock = FrameClock::with_samples(2);
        clock.record(Duration::from_millis(100));
        clock.record(Duration::from_millis(10));
        clock.record(Duration::from_millis(10));
        assert_eq!(clock.average_frame_time(), Duration::from_millis(10));
        assert!((clock.fps() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_long_stall_is_reported_in_full() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.record(Duration::from_secs(3)), Duration::from_secs(3));
        assert_eq!(clock.record(Duration::from_millis(16)), Duration::from_millis(16));
    }
}
