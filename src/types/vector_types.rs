// sample() types

#[derive(Debug, Clone, Default)]
pub struct GradientSampleVec {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct DiagramSampleVec {
    pub rf_active: Vec<bool>,
    pub gradient: GradientSampleVec,
    pub adc_active: Vec<bool>,
}

// trajectory() types

#[derive(Debug, Clone, Default)]
pub struct KSpacePath {
    pub kx: Vec<f64>,
    pub ky: Vec<f64>,
}

// evolve() types

#[derive(Debug, Clone, Default)]
pub struct MagnetizationVec {
    pub mz: Vec<f64>,
    pub mxy: Vec<f64>,
    pub phase: Vec<f64>,
}

// Convert AoS to SoA

use crate::{DiagramSample, KSpaceCoordinate, MagnetizationState};

impl From<Vec<DiagramSample>> for DiagramSampleVec {
    fn from(value: Vec<DiagramSample>) -> Self {
        let gradient = GradientSampleVec {
            x: value.iter().map(|s| s.gradient.x).collect(),
            y: value.iter().map(|s| s.gradient.y).collect(),
            z: value.iter().map(|s| s.gradient.z).collect(),
        };

        Self {
            rf_active: value.iter().map(|s| s.rf_active).collect(),
            gradient,
            adc_active: value.iter().map(|s| s.adc_active).collect(),
        }
    }
}

impl From<Vec<KSpaceCoordinate>> for KSpacePath {
    fn from(value: Vec<KSpaceCoordinate>) -> Self {
        Self {
            kx: value.iter().map(|k| k.kx).collect(),
            ky: value.iter().map(|k| k.ky).collect(),
        }
    }
}

impl From<Vec<MagnetizationState>> for MagnetizationVec {
    fn from(value: Vec<MagnetizationState>) -> Self {
        Self {
            mz: value.iter().map(|m| m.mz).collect(),
            mxy: value.iter().map(|m| m.mxy).collect(),
            phase: value.iter().map(|m| m.phase).collect(),
        }
    }
}

// len() methods

impl GradientSampleVec {
    pub fn len(&self) -> usize {
        let len1 = self.x.len();
        let len2 = self.y.len();
        let len3 = self.z.len();
        assert!(len1 == len2 && len2 == len3);
        len1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagramSampleVec {
    pub fn len(&self) -> usize {
        let len1 = self.rf_active.len();
        let len2 = self.gradient.len();
        let len3 = self.adc_active.len();
        assert!(len1 == len2 && len2 == len3);
        len1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KSpacePath {
    pub fn len(&self) -> usize {
        let len1 = self.kx.len();
        let len2 = self.ky.len();
        assert!(len1 == len2);
        len1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MagnetizationVec {
    pub fn len(&self) -> usize {
        let len1 = self.mz.len();
        let len2 = self.mxy.len();
        let len3 = self.phase.len();
        assert!(len1 == len2 && len2 == len3);
        len1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
