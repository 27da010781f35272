use std::f64::consts::TAU;
use std::ops::MulAssign;

/// Denominators below this magnitude are treated as singular.
pub const SINGULAR_EPS: f64 = 1e-6;

/// `num / den`, or `None` if the denominator is too close to zero for the
/// quotient to mean anything.
pub fn guarded_ratio(num: f64, den: f64) -> Option<f64> {
    if den.abs() < SINGULAR_EPS {
        None
    } else {
        Some(num / den)
    }
}

/// Exponential relaxation factor `exp(-t / tau)`.
pub fn relax(t: f64, tau: f64) -> f64 {
    (-t / tau).exp()
}

/// Clamp a computed magnitude into `[0, inf)`. NaN and infinities (which
/// only show up for non-physical inputs) become zero.
pub fn non_negative(x: f64) -> f64 {
    if x.is_finite() {
        x.max(0.0)
    } else {
        0.0
    }
}

/// Net magnetization vector `(mx, my, mz)` in units of M0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetMagnetization([f64; 3]);

impl NetMagnetization {
    pub fn new(mx: f64, my: f64, mz: f64) -> Self {
        Self([mx, my, mz])
    }

    /// Equilibrium: everything along +z.
    pub fn relaxed() -> Self {
        Self([0.0, 0.0, 1.0])
    }

    pub fn longitudinal(mz: f64) -> Self {
        Self([0.0, 0.0, mz])
    }

    pub fn mx(&self) -> f64 {
        self.0[0]
    }

    pub fn my(&self) -> f64 {
        self.0[1]
    }

    pub fn mz(&self) -> f64 {
        self.0[2]
    }

    /// Length of the transverse component.
    pub fn mxy(&self) -> f64 {
        self.0[0].hypot(self.0[1])
    }

    /// Tip angle away from +z in `[0, pi]`. Zero for a null vector.
    pub fn angle(&self) -> f64 {
        let norm = self.norm();
        if norm == 0.0 {
            return 0.0;
        }
        // Clamp because rounding can push the quotient slightly out of [-1, 1]
        (self.0[2] / norm).clamp(-1.0, 1.0).acos()
    }

    /// Direction of the transverse component, mapped to `[0, 2*pi)`.
    pub fn phase(&self) -> f64 {
        let tmp = f64::atan2(self.0[1], self.0[0]);
        if tmp < 0.0 {
            tmp + TAU
        } else {
            tmp
        }
    }

    pub fn norm(&self) -> f64 {
        (self.0[0] * self.0[0] + self.0[1] * self.0[1] + self.0[2] * self.0[2]).sqrt()
    }
}

/// RF rotation by `angle` about an axis in the transverse plane at `phase`.
/// A phase of zero tips +z towards -y.
pub struct Rotation([[f64; 3]; 3]);

impl Rotation {
    pub fn new(angle: f64, phase: f64) -> Self {
        Self([
            [
                angle.cos() * phase.sin().powi(2) + phase.cos().powi(2),
                (1.0 - angle.cos()) * phase.sin() * phase.cos(),
                angle.sin() * phase.sin(),
            ],
            [
                (1.0 - angle.cos()) * phase.sin() * phase.cos(),
                angle.cos() * phase.cos().powi(2) + phase.sin().powi(2),
                -angle.sin() * phase.cos(),
            ],
            [
                -angle.sin() * phase.sin(),
                angle.sin() * phase.cos(),
                angle.cos(),
            ],
        ])
    }
}

impl MulAssign<Rotation> for NetMagnetization {
    fn mul_assign(&mut self, rhs: Rotation) {
        let x = rhs.0[0][0] * self.0[0] + rhs.0[0][1] * self.0[1] + rhs.0[0][2] * self.0[2];
        let y = rhs.0[1][0] * self.0[0] + rhs.0[1][1] * self.0[1] + rhs.0[1][2] * self.0[2];
        let z = rhs.0[2][0] * self.0[0] + rhs.0[2][1] * self.0[1] + rhs.0[2][2] * self.0[2];
        self.0 = [x, y, z];
    }
}
