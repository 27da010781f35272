//! Fixed timing template of the gradient-echo diagram, in percent of TR.
//! These are drawing constants and do not scale with the absolute TR.

/// An interval on the percent-of-TR axis, `[start, end]` or `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub start: f64,
    pub end: f64,
    /// Whether `end` itself still belongs to the window
    pub closed_end: bool,
}

impl Window {
    /// Closed interval `[start, end]`.
    pub const fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            closed_end: true,
        }
    }

    /// Interval `[start, end)`, for lobes that hand over to the next one.
    pub const fn half_open(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            closed_end: false,
        }
    }

    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && (t < self.end || (self.closed_end && t == self.end))
    }

    /// Position of `t` inside the window, 0 at the start and 1 at the end.
    /// Not clamped.
    pub fn progress(&self, t: f64) -> f64 {
        (t - self.start) / (self.end - self.start)
    }
}

pub const RF_EXCITATION: Window = Window::new(5.0, 15.0);
/// Slice rephaser on Gz, right after the excitation. It ends where the
/// prewinder starts, so tick 20 is not part of it.
pub const SLICE_REPHASE: Window = Window::half_open(15.0, 20.0);
/// Phase-encode blip and readout prewinder run concurrently
pub const PREWIND: Window = Window::new(20.0, 35.0);
pub const READOUT: Window = Window::new(45.0, 75.0);
pub const SPOILER_START: f64 = 90.0;
pub const SPOILER: Window = Window::new(SPOILER_START, 98.0);
/// Phase-encode rewinder of balanced sequences
pub const REWINDER: Window = Window::new(SPOILER_START, 95.0);

/// Number of ticks in one TR; `time_in_tr` runs from 0 to this value.
pub const TICKS_PER_TR: u32 = 100;
