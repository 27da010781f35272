use super::Factors;
use crate::util::guarded_ratio;

/// Longitudinal steady state right before each excitation, as a fraction of
/// M0. `None` if `1 - cos(alpha) * E1` is singular.
pub(crate) fn steady_state_mz(e1: f64, cos_alpha: f64) -> Option<f64> {
    guarded_ratio(1.0 - e1, 1.0 - cos_alpha * e1)
}

pub(super) fn signal(f: &Factors) -> Option<f64> {
    let mz_ss = steady_state_mz(f.e1, f.cos_alpha)?;
    Some(mz_ss * f.sin_alpha * f.e2star)
}
