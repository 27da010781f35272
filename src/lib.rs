//! This file contains the whole public API. It is designed to be as
//! minimalistic as possible while providing all the tools necessary to teach
//! gradient-echo MRI: steady-state signal equations, the magnetization vector
//! within one TR, the k-space trajectory and the comparison charts.
//!
//! Every query is a pure function of a `SequenceParams` snapshot and a
//! `TissueParams` profile. The only state the crate owns is the animation
//! clock in `clock`, which is driven by timers the host provides. Rendering
//! is left to the caller: all functions return plain numbers or
//! struct-of-arrays ready for plotting.

pub mod clock;
pub mod config;
pub mod curves;
mod ernst;
mod error;
pub mod kspace;
pub mod magnetization;
mod signal;
mod tissue;
mod types;
pub mod util;

pub use curves::{ChartKind, ChartOverlay, CurvePoint, CurveSeries};
pub use error::{Error, Result};
pub use tissue::{Tissue, TissueCatalog};
pub use types::*;

use magnetization::MagnetizationModel;

/// Steady-state signal of `tissue` for one parameter set. Never fails,
/// degenerate inputs evaluate to `0.0`. `ti` is ignored unless
/// `sequence_type` is inversion recovery.
pub fn evaluate_signal(
    tr: f64,
    te: f64,
    flip_angle: f64,
    tissue: &TissueParams,
    sequence_type: SequenceType,
    ti: f64,
) -> f64 {
    signal::evaluate(tr, te, flip_angle, tissue, sequence_type, ti)
}

/// Flip angle in degrees that maximizes the spoiled signal, `0.0` if either
/// time is not positive.
pub fn ernst_angle(tr: f64, t1: f64) -> f64 {
    ernst::ernst_angle(tr, t1)
}

/// Magnetization at `time_in_tr` percent of the repetition, using the
/// default precession rate. Use `MagnetizationModel` to pick another one.
pub fn evolve_magnetization(
    seq: &SequenceParams,
    tissue: &TissueParams,
    time_in_tr: f64,
) -> MagnetizationState {
    MagnetizationModel::default().evolve(seq, tissue, time_in_tr)
}

/// k-space position at `time_in_tr` percent of the repetition while the
/// phase-encode `line` is acquired.
pub fn kspace_coordinate(
    time_in_tr: f64,
    line: usize,
    sequence_type: SequenceType,
    gy_amp: f64,
) -> KSpaceCoordinate {
    kspace::coordinate(time_in_tr, line, sequence_type, gy_amp)
}

/// Sweep one parameter for every tissue of `catalog` (or the GM/WM contrast)
/// while holding the rest of `seq` fixed.
pub fn generate_curve_series(
    kind: ChartKind,
    seq: &SequenceParams,
    catalog: &TissueCatalog,
) -> CurveSeries {
    curves::generate(kind, seq, catalog)
}
