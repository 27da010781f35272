use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::NetMagnetization;
use crate::Error;

// Parameter snapshots

/// The gradient-echo sequence families the simulator knows about. Each
/// variant has its own steady-state signal equation, see `crate::signal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SequenceType {
    /// Spoiled GRE (FLASH / SPGR): residual transverse magnetization is
    /// destroyed at the end of every TR.
    #[default]
    #[serde(rename = "spoiled")]
    Spoiled,
    /// Balanced SSFP (TrueFISP): all gradients are rewound, transverse
    /// coherence is carried over into the next TR.
    #[serde(rename = "bssfp")]
    Balanced,
    /// Unbalanced steady-state GRE (FISP), mixed T1 / T2* weighting.
    #[serde(rename = "fisp")]
    Hybrid,
    /// Inversion-recovery GRE with a 180° preparation pulse at TI before
    /// the excitation.
    #[serde(rename = "inversion")]
    InversionRecovery,
}

impl SequenceType {
    pub const ALL: [SequenceType; 4] = [
        SequenceType::Spoiled,
        SequenceType::Balanced,
        SequenceType::Hybrid,
        SequenceType::InversionRecovery,
    ];

    /// Short identifier, also used for serialization.
    pub fn id(self) -> &'static str {
        match self {
            SequenceType::Spoiled => "spoiled",
            SequenceType::Balanced => "bssfp",
            SequenceType::Hybrid => "fisp",
            SequenceType::InversionRecovery => "inversion",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SequenceType::Spoiled => "Spoiled GRE (FLASH/SPGR)",
            SequenceType::Balanced => "Balanced SSFP (TrueFISP)",
            SequenceType::Hybrid => "FISP (Steady-State GRE)",
            SequenceType::InversionRecovery => "Inversion Recovery (IR-GRE)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SequenceType::Spoiled => {
                "Transverse magnetization is destroyed (spoiled) after each TR. Pure T1/PD contrast."
            }
            SequenceType::Balanced => {
                "Balanced gradients preserve coherence. High SNR with T2/T1 weighted contrast."
            }
            SequenceType::Hybrid => {
                "Hybrid steady-state behavior with mixed T1 and T2* weighting."
            }
            SequenceType::InversionRecovery => {
                "180° preparation pulse with TI-based nulling for selective suppression."
            }
        }
    }

    /// The signal equation evaluated by `crate::signal::evaluate`, as text.
    pub fn equation(self) -> &'static str {
        match self {
            SequenceType::Spoiled => {
                "S = S₀ · ((1 - e^(-TR/T1)) / (1 - cos(α)e^(-TR/T1))) · sin(α) · e^(-TE/T2*)"
            }
            SequenceType::Balanced => {
                "S = S₀ · (sin(α)(1 - e^(-TR/T1))) / (1 - (e^(-TR/T1)-e^(-TR/T2))cos(α) - e^(-TR/T1)e^(-TR/T2)) · e^(-TE/T2)"
            }
            SequenceType::Hybrid => {
                "S = S₀ · ((1 - e^(-TR/T1))sin(α)) / (1 - e^(-TR/T1)cos(α) - e^(-TR/T2)(e^(-TR/T1)-cos(α))) · e^(-TE/T2*)"
            }
            SequenceType::InversionRecovery => {
                "S = S₀ · |1 - 2e^(-TI/T1) + e^(-TR/T1)| · sin(α) · e^(-TE/T2*)"
            }
        }
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SequenceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spoiled" | "flash" | "spgr" => Ok(SequenceType::Spoiled),
            "bssfp" | "balanced" | "balanced-steady-state" | "truefisp" => {
                Ok(SequenceType::Balanced)
            }
            "fisp" | "hybrid" | "steady-state-hybrid" => Ok(SequenceType::Hybrid),
            "inversion" | "inversion-recovery" | "ir" => Ok(SequenceType::InversionRecovery),
            _ => Err(Error::UnknownSequenceType(s.to_owned())),
        }
    }
}

/// Snapshot of the sequence parameters the user currently has dialed in.
/// The simulator never keeps one around, every query takes it by reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceParams {
    /// Unit: `ms`
    pub tr: f64,
    /// Unit: `ms`
    pub te: f64,
    /// Unit: `ms`
    pub ti: f64,
    /// Unit: `deg`
    pub flip_angle: f64,
    pub sequence_type: SequenceType,
    /// Slice-select gradient scale, dimensionless
    pub gz_amp: f64,
    /// Phase-encode gradient scale, dimensionless
    pub gy_amp: f64,
    /// Readout gradient scale, dimensionless
    pub gx_amp: f64,
}

impl Default for SequenceParams {
    fn default() -> Self {
        Self {
            tr: 150.0,
            te: 5.0,
            ti: 150.0,
            flip_angle: 60.0,
            sequence_type: SequenceType::Spoiled,
            gz_amp: 1.0,
            gy_amp: 1.0,
            gx_amp: 1.2,
        }
    }
}

impl SequenceParams {
    /// Flip angle in radians.
    pub fn alpha(&self) -> f64 {
        self.flip_angle.to_radians()
    }
}

/// Relaxation profile of a single tissue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TissueParams {
    /// Unit: `ms`
    pub t1: f64,
    /// Unit: `ms`
    pub t2: f64,
    /// Unit: `ms`
    pub t2star: f64,
    /// Proton density relative to pure water, `[0, 1]`
    pub pd: f64,
}

// evolve() types

/// State of the magnetization vector at one point in time. `mz` and `mxy`
/// are fractions of the equilibrium magnetization M0.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct MagnetizationState {
    /// Longitudinal component, signed
    pub mz: f64,
    /// Transverse magnitude, never negative
    pub mxy: f64,
    /// Unit: `rad`, grows without wrapping
    pub phase: f64,
}

impl MagnetizationState {
    pub fn mx(&self) -> f64 {
        self.mxy * self.phase.cos()
    }

    pub fn my(&self) -> f64 {
        self.mxy * self.phase.sin()
    }

    /// Cartesian (mx, my, mz) vector for drawing the net magnetization.
    pub fn vector(&self) -> NetMagnetization {
        NetMagnetization::new(self.mx(), self.my(), self.mz)
    }
}

// kspace types

/// Normalized spatial frequency, both axes nominally in `[-1, 1]`. `ky` is
/// scaled by the phase-encode gradient amplitude and may leave that range
/// when `gy_amp > 1`.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct KSpaceCoordinate {
    /// Frequency-encode axis
    pub kx: f64,
    /// Phase-encode axis
    pub ky: f64,
}

impl KSpaceCoordinate {
    pub const ORIGIN: KSpaceCoordinate = KSpaceCoordinate { kx: 0.0, ky: 0.0 };
}

// sample() types

/// Contains the gradient amplitudes of the sequence diagram at one tick.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct GradientSample {
    /// Readout, scaled by `gx_amp`
    pub x: f64,
    /// Phase encode, scaled by the current line and `gy_amp`
    pub y: f64,
    /// Slice select, scaled by `gz_amp`
    pub z: f64,
}

/// State of the sequence diagram at one tick. Like a real sequence, RF and
/// ADC are only reported as being active or not.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct DiagramSample {
    pub rf_active: bool,
    pub gradient: GradientSample,
    pub adc_active: bool,
}
