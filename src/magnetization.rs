//! Continuous evolution of the net magnetization within one TR, used to
//! animate the magnetization vector between two excitations.
//!
//! This is not a Bloch simulation: the state right after the pulse is taken
//! from the closed-form steady state and then relaxes analytically towards
//! equilibrium until the next pulse.

use crate::signal::{inversion, spoiled};
use crate::util::{relax, NetMagnetization, Rotation};
use crate::{MagnetizationState, MagnetizationVec, SequenceParams, SequenceType, TissueParams};

/// Default visual precession rate. Chosen so the transverse component turns
/// at a pace that is easy to follow on screen, it is not a Larmor frequency.
/// Unit: `rad / ms`
pub const DEFAULT_PRECESSION_RATE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnetizationModel {
    /// Unit: `rad / ms`
    pub precession_rate: f64,
}

impl Default for MagnetizationModel {
    fn default() -> Self {
        Self {
            precession_rate: DEFAULT_PRECESSION_RATE,
        }
    }
}

impl MagnetizationModel {
    pub fn new(precession_rate: f64) -> Self {
        Self { precession_rate }
    }

    /// State of the magnetization at `time_in_tr` percent of the current
    /// repetition, where 0 is the excitation pulse.
    pub fn evolve(
        &self,
        seq: &SequenceParams,
        tissue: &TissueParams,
        time_in_tr: f64,
    ) -> MagnetizationState {
        let start = excited(seq, tissue);

        let time_ms = (time_in_tr / 100.0) * seq.tr;
        let decay_const = match seq.sequence_type {
            SequenceType::Balanced => tissue.t2,
            _ => tissue.t2star,
        };

        MagnetizationState {
            mz: 1.0 - (1.0 - start.mz()) * relax(time_ms, tissue.t1),
            mxy: start.mxy() * relax(time_ms, decay_const),
            phase: time_ms * self.precession_rate,
        }
    }

    /// `evolve` for many ticks at once, as columns for plotting.
    pub fn trajectory(
        &self,
        seq: &SequenceParams,
        tissue: &TissueParams,
        ticks: &[f64],
    ) -> MagnetizationVec {
        ticks
            .iter()
            .map(|&t| self.evolve(seq, tissue, t))
            .collect::<Vec<_>>()
            .into()
    }
}

/// Longitudinal magnetization available right before the excitation.
pub fn available_mz(seq: &SequenceParams, tissue: &TissueParams) -> f64 {
    let e1 = relax(seq.tr, tissue.t1);
    match seq.sequence_type {
        SequenceType::InversionRecovery => inversion::mz_at_ti(seq.ti, tissue.t1, e1),
        // Only a vanishing flip angle together with a vanishing TR can make
        // this singular; the limit for alpha -> 0 is full relaxation.
        _ => spoiled::steady_state_mz(e1, seq.alpha().cos()).unwrap_or(1.0),
    }
}

/// The magnetization vector right after the excitation pulse.
fn excited(seq: &SequenceParams, tissue: &TissueParams) -> NetMagnetization {
    let mut m = NetMagnetization::longitudinal(available_mz(seq, tissue));
    m *= Rotation::new(seq.alpha(), 0.0);
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tissue;
    use assert2::check;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn gray_matter_spoiled_reference() {
        let seq = SequenceParams::default();
        let gm = Tissue::GrayMatter.params();
        let model = MagnetizationModel::default();

        let at_pulse = model.evolve(&seq, &gm, 0.0);
        check!(close(at_pulse.mz, 0.1274455890282004));
        check!(close(at_pulse.mxy, 0.22074223539738572));
        check!(at_pulse.phase == 0.0);

        let half = model.evolve(&seq, &gm, 50.0);
        check!(close(half.mz, 0.1936824513624371));
        check!(close(half.mxy, 0.07560837773899212));
        check!(close(half.phase, 7.5));
    }

    #[test]
    fn mz_recovers_and_mxy_decays() {
        let gm = Tissue::GrayMatter.params();
        let model = MagnetizationModel::default();
        for ty in SequenceType::ALL {
            let seq = SequenceParams {
                sequence_type: ty,
                ..Default::default()
            };
            let mut prev = model.evolve(&seq, &gm, 0.0);
            for tick in 1..=100 {
                let m = model.evolve(&seq, &gm, tick as f64);
                check!(m.mz >= prev.mz);
                check!(m.mz <= 1.0);
                check!(m.mxy <= prev.mxy);
                check!(m.mxy >= 0.0);
                prev = m;
            }
        }
    }

    #[test]
    fn balanced_decays_slower_than_spoiled() {
        let gm = Tissue::GrayMatter.params();
        let model = MagnetizationModel::default();
        let spoiled = SequenceParams::default();
        let balanced = SequenceParams {
            sequence_type: SequenceType::Balanced,
            ..spoiled
        };
        // Same starting point, T2 = 100 ms vs T2* = 70 ms
        let s = model.evolve(&spoiled, &gm, 100.0);
        let b = model.evolve(&balanced, &gm, 100.0);
        check!(b.mxy > s.mxy);
    }

    #[test]
    fn inversion_starts_negative_before_null_point() {
        let csf = Tissue::Csf.params();
        let seq = SequenceParams {
            sequence_type: SequenceType::InversionRecovery,
            ti: 500.0,
            tr: 3000.0,
            flip_angle: 20.0,
            ..Default::default()
        };
        let m = MagnetizationModel::default().evolve(&seq, &csf, 0.0);
        check!(m.mz < 0.0);
        check!(m.mxy > 0.0);
    }

    #[test]
    fn custom_precession_rate() {
        let seq = SequenceParams::default();
        let m = MagnetizationModel::new(0.5).evolve(&seq, &Tissue::Fat.params(), 20.0);
        check!(close(m.phase, 0.2 * 150.0 * 0.5));
    }

    #[test]
    fn degenerate_timing_stays_finite() {
        let tissue = TissueParams {
            t1: 1e-3,
            t2: 1e-3,
            t2star: 1e-3,
            pd: 1.0,
        };
        let model = MagnetizationModel::default();
        for ty in SequenceType::ALL {
            for (tr, flip) in [(1e-12, 0.0), (1e6, 90.0), (1e-300, 1e-9)] {
                let seq = SequenceParams {
                    tr,
                    flip_angle: flip,
                    sequence_type: ty,
                    ..Default::default()
                };
                let m = model.evolve(&seq, &tissue, 100.0);
                check!(m.mz.is_finite());
                check!(m.mxy.is_finite());
                check!(m.phase.is_finite());
            }
        }
    }

    #[test]
    fn cartesian_components() {
        let m = MagnetizationState {
            mz: 0.3,
            mxy: 0.5,
            phase: std::f64::consts::FRAC_PI_2,
        };
        check!(m.mx().abs() < 1e-12);
        check!(close(m.my(), 0.5));
        check!(close(m.vector().mxy(), 0.5));
    }

    #[test]
    fn trajectory_has_one_state_per_tick() {
        let ticks: Vec<f64> = (0..=100).map(f64::from).collect();
        let traj = MagnetizationModel::default().trajectory(
            &SequenceParams::default(),
            &Tissue::WhiteMatter.params(),
            &ticks,
        );
        check!(traj.len() == 101);
    }
}
