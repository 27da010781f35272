//! Where the sequence is in k-space at any tick of the repetition.
//!
//! Within one TR the phase-encode and prewinder gradients move the sampling
//! point from the centre to the start of the current line, the readout then
//! sweeps it across kx. Which line is acquired changes slowly, over many
//! repetitions, and is tracked by `PhaseEncodeLine`.

use crate::{KSpaceCoordinate, KSpacePath, SequenceType};

mod diagram;
mod encoding;
mod line;
pub mod timing;

pub use diagram::{echo_tick, SequenceDiagram};
pub use encoding::{phase_grid, VoxelPhase, GRID_SIZE};
pub use line::PhaseEncodeLine;

use timing::{PREWIND, READOUT, SPOILER_START};

/// Number of phase-encode lines of the simulated acquisition.
pub const TOTAL_LINES: usize = 32;

/// Position of `line` on the phase-encode axis without gradient scaling:
/// line 0 is at +1, the last line at -1. Lines past the end are clamped to
/// the last line.
pub fn ky_visual(line: usize) -> f64 {
    let line = line.min(TOTAL_LINES - 1);
    1.0 - 2.0 * (line as f64 / (TOTAL_LINES - 1) as f64)
}

/// Phase-encode position reached at the end of the prewinder.
pub fn ky_target(line: usize, gy_amp: f64) -> f64 {
    ky_visual(line) * gy_amp
}

/// k-space position at `time_in_tr` percent of the repetition while
/// acquiring `line`. Defined for every tick, values outside of `[0, 100]`
/// hold the nearest end of the template.
pub fn coordinate(
    time_in_tr: f64,
    line: usize,
    sequence_type: SequenceType,
    gy_amp: f64,
) -> KSpaceCoordinate {
    // The spoiler destroys whatever phase the readout left behind
    if sequence_type == SequenceType::Spoiled && time_in_tr >= SPOILER_START {
        return KSpaceCoordinate::ORIGIN;
    }

    let ky = ky_target(line, gy_amp);
    if time_in_tr < PREWIND.start {
        KSpaceCoordinate::ORIGIN
    } else if PREWIND.contains(time_in_tr) {
        let p = PREWIND.progress(time_in_tr);
        KSpaceCoordinate { kx: -p, ky: p * ky }
    } else if time_in_tr < READOUT.start {
        KSpaceCoordinate { kx: -1.0, ky }
    } else if READOUT.contains(time_in_tr) {
        let p = READOUT.progress(time_in_tr);
        KSpaceCoordinate {
            kx: -1.0 + 2.0 * p,
            ky,
        }
    } else {
        KSpaceCoordinate { kx: 1.0, ky }
    }
}

/// Whether the ADC samples at this tick.
pub fn is_acquiring_signal(time_in_tr: f64) -> bool {
    READOUT.contains(time_in_tr)
}

/// `coordinate` for many ticks at once, as columns for plotting.
pub fn path(ticks: &[f64], line: usize, sequence_type: SequenceType, gy_amp: f64) -> KSpacePath {
    ticks
        .iter()
        .map(|&t| coordinate(t, line, sequence_type, gy_amp))
        .collect::<Vec<_>>()
        .into()
}
