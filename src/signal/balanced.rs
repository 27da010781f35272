use super::Factors;
use crate::util::{guarded_ratio, relax};
use crate::TissueParams;

// Fully refocused: the echo decays with T2, not T2*.
pub(super) fn signal(f: &Factors, te: f64, tissue: &TissueParams) -> Option<f64> {
    let numerator = (1.0 - f.e1) * f.sin_alpha;
    let denominator = 1.0 - (f.e1 - f.e2) * f.cos_alpha - f.e1 * f.e2;
    let ss = guarded_ratio(numerator, denominator)?;
    Some(ss * relax(te, tissue.t2))
}
