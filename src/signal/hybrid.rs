use super::Factors;
use crate::util::guarded_ratio;

pub(super) fn signal(f: &Factors) -> Option<f64> {
    let numerator = (1.0 - f.e1) * f.sin_alpha;
    let denominator = 1.0 - f.e1 * f.cos_alpha - f.e2 * (f.e1 - f.cos_alpha);
    let ss = guarded_ratio(numerator, denominator)?;
    Some(ss * f.e2star)
}
