//! Closed-form steady-state signal equations. Every family lives in its own
//! module and is dispatched by `SequenceType`, so adding a family is a
//! compile error everywhere it is not handled yet.

use crate::util::{non_negative, relax};
use crate::{SequenceType, TissueParams};

mod balanced;
mod hybrid;
pub(crate) mod inversion;
pub(crate) mod spoiled;

/// The per-TR relaxation and excitation factors all families are built on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Factors {
    /// `exp(-TR / T1)`
    pub e1: f64,
    /// `exp(-TR / T2)`
    pub e2: f64,
    /// `exp(-TE / T2*)`
    pub e2star: f64,
    pub sin_alpha: f64,
    pub cos_alpha: f64,
}

impl Factors {
    pub fn new(tr: f64, te: f64, flip_angle_deg: f64, tissue: &TissueParams) -> Self {
        let alpha = flip_angle_deg.to_radians();
        Self {
            e1: relax(tr, tissue.t1),
            e2: relax(tr, tissue.t2),
            e2star: relax(te, tissue.t2star),
            sin_alpha: alpha.sin(),
            cos_alpha: alpha.cos(),
        }
    }
}

/// Steady-state signal of `tissue` for the given timing, as a fraction of
/// the fully relaxed signal of pure water.
///
/// Never fails: a non-positive TR, a near-singular denominator or a negative
/// steady state all yield `0.0`. `ti` is only used by inversion recovery.
pub fn evaluate(
    tr: f64,
    te: f64,
    flip_angle_deg: f64,
    tissue: &TissueParams,
    sequence_type: SequenceType,
    ti: f64,
) -> f64 {
    if tr <= 0.0 {
        return 0.0;
    }

    let f = Factors::new(tr, te, flip_angle_deg, tissue);
    let weighting = match sequence_type {
        SequenceType::Spoiled => spoiled::signal(&f),
        SequenceType::Balanced => balanced::signal(&f, te, tissue),
        SequenceType::Hybrid => hybrid::signal(&f),
        SequenceType::InversionRecovery => Some(inversion::signal(&f, ti, tissue)),
    };

    weighting.map_or(0.0, |w| non_negative(tissue.pd * w))
}
