//! The two counters that drive the animation and a small driver tying them
//! to the host's timers.
//!
//! The simulator does not own any timer itself. The host implements
//! `TimerPort` on top of whatever scheduler it runs (a browser interval, a
//! GUI event loop, a test double) and forwards expirations to
//! `Animator::on_timer`. Everything runs on the caller's thread.

use std::time::Duration;

use tracing::trace;

use crate::config::AnimationConfig;
use crate::kspace::{self, timing::TICKS_PER_TR, PhaseEncodeLine, SequenceDiagram};
use crate::magnetization::MagnetizationModel;
use crate::{DiagramSample, KSpaceCoordinate, MagnetizationState, SequenceParams, TissueParams};

/// Position within the current TR, from 0 (excitation) to `TICKS_PER_TR`
/// inclusive, after which it wraps back to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrClock {
    tick: u32,
}

impl TrClock {
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// The tick as the `time_in_tr` argument of the models.
    pub fn time_in_tr(&self) -> f64 {
        f64::from(self.tick)
    }

    pub fn advance(&mut self) -> u32 {
        self.tick = (self.tick + 1) % (TICKS_PER_TR + 1);
        self.tick
    }

    /// Clamped to `TICKS_PER_TR`.
    pub fn set_manual(&mut self, tick: u32) {
        self.tick = tick.min(TICKS_PER_TR);
    }

    pub fn reset(&mut self) {
        self.tick = 0;
    }
}

/// Wall-clock period of one TR tick: a hundredth of TR, but never shorter
/// than `min_interval_ms` so short TRs stay watchable. A non-finite TR
/// falls back to `min_interval_ms`.
pub fn tick_interval(tr: f64, min_interval_ms: f64) -> Duration {
    let per_tick = tr / f64::from(TICKS_PER_TR);
    if per_tick.is_finite() {
        millis(per_tick.max(min_interval_ms))
    } else {
        millis(min_interval_ms)
    }
}

/// Rounded to whole nanoseconds; anything not positive and finite is zero.
fn millis(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_nanos((ms * 1e6).round() as u64)
    } else {
        Duration::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Advances the position within TR
    Tick,
    /// Advances the phase-encode line
    Line,
}

/// Periodic timers provided by the host. Arming a timer that is already
/// armed replaces it; there is never more than one timer per id.
pub trait TimerPort {
    fn arm(&mut self, id: TimerId, period: Duration);
    fn cancel(&mut self, id: TimerId);
}

/// Everything the views need to draw one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tick: u32,
    pub line: usize,
    pub magnetization: MagnetizationState,
    pub kspace: KSpaceCoordinate,
    pub diagram: DiagramSample,
    /// Marker of the echo on the tick axis
    pub echo_tick: f64,
}

pub struct Animator<P: TimerPort> {
    port: P,
    config: AnimationConfig,
    model: MagnetizationModel,
    params: SequenceParams,
    clock: TrClock,
    line: PhaseEncodeLine,
    running: bool,
}

impl<P: TimerPort> Animator<P> {
    pub fn new(port: P, config: AnimationConfig, params: SequenceParams) -> Self {
        Self {
            port,
            model: MagnetizationModel::new(config.precession_rate_rad_per_ms),
            line: PhaseEncodeLine::new(config.initial_line),
            config,
            params,
            clock: TrClock::default(),
            running: false,
        }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn params(&self) -> &SequenceParams {
        &self.params
    }

    pub fn clock(&self) -> &TrClock {
        &self.clock
    }

    pub fn line(&self) -> &PhaseEncodeLine {
        &self.line
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    fn arm_tick(&mut self) {
        let period = tick_interval(self.params.tr, self.config.min_tick_interval_ms);
        trace!(?period, tr = self.params.tr, "arming TR tick timer");
        self.port.arm(TimerId::Tick, period);
    }

    fn arm_line(&mut self) {
        let period = millis(self.config.line_advance_period_ms);
        trace!(?period, "arming line timer");
        self.port.arm(TimerId::Line, period);
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.arm_tick();
        if self.line.is_acquiring() {
            self.arm_line();
        }
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        trace!("stopping all timers");
        self.port.cancel(TimerId::Tick);
        self.port.cancel(TimerId::Line);
    }

    /// Replace the parameter snapshot. A new TR changes the tick period, so
    /// the tick timer is cancelled and armed again.
    pub fn set_params(&mut self, params: SequenceParams) {
        let tr_changed = params.tr != self.params.tr;
        self.params = params;
        if tr_changed && self.running {
            self.port.cancel(TimerId::Tick);
            self.arm_tick();
        }
    }

    /// Forward a timer expiration from the host.
    pub fn on_timer(&mut self, id: TimerId) {
        if !self.running {
            return;
        }
        match id {
            TimerId::Tick => {
                self.clock.advance();
            }
            TimerId::Line => {
                self.line.on_timer();
            }
        }
    }

    /// Jump to a line by hand; automatic advancement stops until
    /// `resume_lines`.
    pub fn scrub_line(&mut self, line: usize) {
        self.line.set_manual(line);
        if self.running {
            self.port.cancel(TimerId::Line);
        }
    }

    pub fn pause_lines(&mut self) {
        self.line.pause();
        if self.running {
            self.port.cancel(TimerId::Line);
        }
    }

    pub fn resume_lines(&mut self) {
        let was_acquiring = self.line.is_acquiring();
        self.line.resume();
        if self.running && !was_acquiring {
            self.arm_line();
        }
    }

    /// Both counters back to their initial state. Timers keep running.
    pub fn reset(&mut self) {
        let was_acquiring = self.line.is_acquiring();
        self.clock.reset();
        self.line.reset();
        if self.running && !was_acquiring {
            self.arm_line();
        }
    }

    /// Evaluate all models at the current tick and line for `tissue`.
    pub fn frame(&self, tissue: &TissueParams) -> Frame {
        let t = self.clock.time_in_tr();
        let line = self.line.get();
        Frame {
            tick: self.clock.tick(),
            line,
            magnetization: self.model.evolve(&self.params, tissue, t),
            kspace: kspace::coordinate(t, line, self.params.sequence_type, self.params.gy_amp),
            diagram: SequenceDiagram::new(&self.params, line).sample_one(t),
            echo_tick: kspace::echo_tick(&self.params),
        }
    }
}
