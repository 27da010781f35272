use super::Factors;
use crate::util::relax;
use crate::TissueParams;

/// Longitudinal magnetization at the excitation, TI after the inversion
/// pulse. Signed: negative while the tissue has not crossed its null point.
pub(crate) fn mz_at_ti(ti: f64, t1: f64, e1: f64) -> f64 {
    1.0 - 2.0 * relax(ti, t1) + e1
}

pub(super) fn signal(f: &Factors, ti: f64, tissue: &TissueParams) -> f64 {
    mz_at_ti(ti, tissue.t1, f.e1).abs() * f.sin_alpha * f.e2star
}
