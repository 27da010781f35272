use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::kspace::TOTAL_LINES;
use crate::magnetization::DEFAULT_PRECESSION_RATE;
use crate::{Error, Result, SequenceParams};

/// Visualization tuning. None of these values are physical constants, they
/// only control how fast things move on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Visual precession of the transverse magnetization, `rad / ms`
    #[serde(default = "AnimationConfig::default_precession_rate")]
    pub precession_rate_rad_per_ms: f64,
    /// Lower bound on the wall-clock period of one TR tick
    #[serde(default = "AnimationConfig::default_min_tick_interval_ms")]
    pub min_tick_interval_ms: f64,
    /// Wall-clock period between two phase-encode lines
    #[serde(default = "AnimationConfig::default_line_advance_period_ms")]
    pub line_advance_period_ms: f64,
    #[serde(default = "AnimationConfig::default_initial_line")]
    pub initial_line: usize,
}

impl AnimationConfig {
    fn default_precession_rate() -> f64 {
        DEFAULT_PRECESSION_RATE
    }
    fn default_min_tick_interval_ms() -> f64 {
        20.0
    }
    fn default_line_advance_period_ms() -> f64 {
        700.0
    }
    fn default_initial_line() -> usize {
        TOTAL_LINES / 2
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            precession_rate_rad_per_ms: Self::default_precession_rate(),
            min_tick_interval_ms: Self::default_min_tick_interval_ms(),
            line_advance_period_ms: Self::default_line_advance_period_ms(),
            initial_line: Self::default_initial_line(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Parameters the simulator starts with
    #[serde(default)]
    pub sequence: SequenceParams,
}

impl SimulatorConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        let cfg = Self::from_toml(&text)?;
        debug!(path = %path.display(), "loaded simulator config");
        Ok(cfg)
    }

    /// Like `load`, but falls back to the defaults if the file is missing or
    /// broken.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("{err}. Using defaults.");
                Self::default()
            }
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the ranges the simulator relies on. The numeric core copes with
    /// anything, but a config outside of these ranges is almost certainly a
    /// typo.
    pub fn validate(&self) -> Result<()> {
        let a = &self.animation;
        positive("animation.precession_rate_rad_per_ms", a.precession_rate_rad_per_ms)?;
        positive("animation.min_tick_interval_ms", a.min_tick_interval_ms)?;
        positive("animation.line_advance_period_ms", a.line_advance_period_ms)?;
        if a.initial_line >= TOTAL_LINES {
            return Err(Error::InvalidConfig {
                field: "animation.initial_line",
                message: format!("must be below {TOTAL_LINES}, got {}", a.initial_line),
            });
        }

        let s = &self.sequence;
        positive("sequence.tr", s.tr)?;
        non_negative("sequence.te", s.te)?;
        non_negative("sequence.ti", s.ti)?;
        if !(0.0..=90.0).contains(&s.flip_angle) {
            return Err(Error::InvalidConfig {
                field: "sequence.flip_angle",
                message: format!("must be within [0, 90] degrees, got {}", s.flip_angle),
            });
        }
        positive("sequence.gz_amp", s.gz_amp)?;
        positive("sequence.gy_amp", s.gy_amp)?;
        positive("sequence.gx_amp", s.gx_amp)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            message: format!("must be positive, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field,
            message: format!("must not be negative, got {value}"),
        })
    }
}
