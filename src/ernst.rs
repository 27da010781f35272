use crate::util::relax;

/// Flip angle in degrees that maximizes the spoiled steady-state signal for
/// the given TR and T1: `acos(exp(-TR / T1))`.
///
/// Returns `0.0` if either input is not positive.
pub fn ernst_angle(tr: f64, t1: f64) -> f64 {
    if tr <= 0.0 || t1 <= 0.0 {
        return 0.0;
    }
    // exp(-tr / t1) is in (0, 1) here, always inside the acos domain
    relax(tr, t1).acos().to_degrees()
}
