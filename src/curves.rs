//! Parameter sweeps for the comparison charts. Each chart kind sweeps one
//! variable over a fixed grid while every other parameter is held at the
//! current snapshot, producing one series per tissue.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ernst::ernst_angle;
use crate::util::relax;
use crate::{signal, Error, SequenceParams, SequenceType, Tissue, TissueCatalog, TissueParams};

/// Key of the only series of a contrast chart.
pub const CONTRAST_KEY: &str = "Contrast";

const TR_STEPS: [f64; 20] = [
    0.0, 5.0, 10.0, 20.0, 30.0, 40.0, 50.0, 75.0, 100.0, 150.0, 200.0, 300.0, 400.0, 500.0, 750.0,
    1000.0, 1500.0, 2000.0, 3000.0, 5000.0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    /// Signal vs flip angle
    #[serde(rename = "flipAngle")]
    FlipAngle,
    /// Signal vs TR
    #[serde(rename = "tr")]
    Tr,
    /// Signal vs TE
    #[serde(rename = "te")]
    Te,
    /// GM/WM contrast vs flip angle
    #[serde(rename = "contrast")]
    Contrast,
    /// T1 recovery after saturation
    #[serde(rename = "relaxation")]
    Relaxation,
    /// T2 (balanced) or T2* decay
    #[serde(rename = "t2relaxation")]
    T2Relaxation,
    /// Signal vs TI
    #[serde(rename = "ti")]
    Ti,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::FlipAngle,
        ChartKind::Tr,
        ChartKind::Te,
        ChartKind::Contrast,
        ChartKind::Relaxation,
        ChartKind::T2Relaxation,
        ChartKind::Ti,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartKind::FlipAngle => "flipAngle",
            ChartKind::Tr => "tr",
            ChartKind::Te => "te",
            ChartKind::Contrast => "contrast",
            ChartKind::Relaxation => "relaxation",
            ChartKind::T2Relaxation => "t2relaxation",
            ChartKind::Ti => "ti",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::FlipAngle => "Signal vs α",
            ChartKind::Tr => "Signal vs TR",
            ChartKind::Te => "Signal vs TE",
            ChartKind::Contrast => "Contrast",
            ChartKind::Relaxation => "T1 Relax",
            ChartKind::T2Relaxation => "T2 Relax",
            ChartKind::Ti => "Signal vs TI",
        }
    }

    /// The fixed independent-variable grid of this chart.
    pub fn grid(self) -> Vec<f64> {
        match self {
            ChartKind::FlipAngle | ChartKind::Contrast => stepped(90, 2),
            ChartKind::Tr => TR_STEPS.to_vec(),
            ChartKind::Te => stepped(200, 5),
            ChartKind::Ti | ChartKind::Relaxation => stepped(4000, 50),
            ChartKind::T2Relaxation => stepped(500, 5),
        }
    }
}

/// `0, step, 2*step, ..., max`, counted in integers so the grid is exact.
fn stepped(max: u32, step: u32) -> Vec<f64> {
    (0..=max).step_by(step as usize).map(f64::from).collect()
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|k| k.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownChartKind(s.to_owned()))
    }
}

/// One x position of a chart with the value of every series there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    /// Parallel to `CurveSeries::keys`
    pub values: Vec<f64>,
}

/// All series of one chart, points in ascending x.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSeries {
    pub kind: ChartKind,
    pub keys: Vec<&'static str>,
    pub points: Vec<CurvePoint>,
}

impl CurveSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn key_index(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    /// Value of series `key` at point `index`.
    pub fn value(&self, index: usize, key: &str) -> Option<f64> {
        let k = self.key_index(key)?;
        self.points.get(index).map(|p| p.values[k])
    }

    /// Value of series `key` at exactly `x`, if `x` is on the grid.
    pub fn value_at(&self, x: f64, key: &str) -> Option<f64> {
        let k = self.key_index(key)?;
        self.points.iter().find(|p| p.x == x).map(|p| p.values[k])
    }

    /// Series `key` as `(x, y)` pairs.
    pub fn series(&self, key: &str) -> Option<Vec<(f64, f64)>> {
        let k = self.key_index(key)?;
        Some(self.points.iter().map(|p| (p.x, p.values[k])).collect())
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Series `key` as a column, parallel to `xs()`.
    pub fn column(&self, key: &str) -> Option<Vec<f64>> {
        let k = self.key_index(key)?;
        Some(self.points.iter().map(|p| p.values[k]).collect())
    }

    /// Axis ranges `(min_x, max_x, min_y, max_y)` for plotting. The y axis
    /// starts at zero and spans at least 0.2 so flat curves stay readable.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        if self.points.is_empty() {
            return (0.0, 1.0, 0.0, 1.0);
        }
        let min_x = self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = self
            .points
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_y = self
            .points
            .iter()
            .flat_map(|p| p.values.iter().copied())
            .fold(0.2, f64::max);
        (min_x, max_x, 0.0, max_y)
    }
}

/// Regenerate every series of `kind` for the current parameters.
pub fn generate(kind: ChartKind, seq: &SequenceParams, catalog: &TissueCatalog) -> CurveSeries {
    if kind == ChartKind::Contrast {
        return contrast(seq, catalog);
    }

    let keys: Vec<&'static str> = catalog.keys().collect();
    let tissues: Vec<&TissueParams> = catalog.iter().map(|(_, p)| p).collect();
    let point = |x: f64| CurvePoint {
        x,
        values: tissues.iter().map(|t| sweep_value(kind, x, seq, t)).collect(),
    };

    CurveSeries {
        kind,
        keys,
        points: kind.grid().into_iter().map(point).collect(),
    }
}

fn sweep_value(kind: ChartKind, x: f64, seq: &SequenceParams, t: &TissueParams) -> f64 {
    let ty = seq.sequence_type;
    match kind {
        ChartKind::FlipAngle | ChartKind::Contrast => {
            signal::evaluate(seq.tr, seq.te, x, t, ty, seq.ti)
        }
        ChartKind::Tr => signal::evaluate(x, seq.te, seq.flip_angle, t, ty, seq.ti),
        ChartKind::Te => signal::evaluate(seq.tr, x, seq.flip_angle, t, ty, seq.ti),
        ChartKind::Ti => signal::evaluate(seq.tr, seq.te, seq.flip_angle, t, ty, x),
        ChartKind::Relaxation => 1.0 - relax(x, t.t1),
        ChartKind::T2Relaxation => {
            let decay_const = match ty {
                SequenceType::Balanced => t.t2,
                _ => t.t2star,
            };
            relax(x, decay_const)
        }
    }
}

fn contrast(seq: &SequenceParams, catalog: &TissueCatalog) -> CurveSeries {
    let gm = lookup(catalog, Tissue::GrayMatter);
    let wm = lookup(catalog, Tissue::WhiteMatter);
    let signal_of = |tissue: Option<&TissueParams>, x: f64| {
        tissue.map_or(0.0, |t| sweep_value(ChartKind::Contrast, x, seq, t))
    };

    let points = ChartKind::Contrast
        .grid()
        .into_iter()
        .map(|x| CurvePoint {
            x,
            values: vec![(signal_of(gm, x) - signal_of(wm, x)).abs()],
        })
        .collect();

    CurveSeries {
        kind: ChartKind::Contrast,
        keys: vec![CONTRAST_KEY],
        points,
    }
}

fn lookup(catalog: &TissueCatalog, tissue: Tissue) -> Option<&TissueParams> {
    let params = catalog.get(tissue);
    if params.is_none() {
        warn!(tissue = tissue.key(), "tissue missing from catalog, treating its signal as zero");
    }
    params
}

/// Markers drawn on top of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartOverlay {
    /// Ernst angle of gray matter, only on the flip-angle chart
    pub ernst_angle: Option<f64>,
    /// Where the current parameters sit on the chart: `(x, gray matter signal)`
    pub operating_point: (f64, f64),
}

/// Overlay markers for `series`, generated from the same snapshot.
pub fn overlay(series: &CurveSeries, seq: &SequenceParams) -> ChartOverlay {
    let gm = Tissue::GrayMatter.params();
    let current = signal::evaluate(
        seq.tr,
        seq.te,
        seq.flip_angle,
        &gm,
        seq.sequence_type,
        seq.ti,
    );

    let x = match series.kind {
        ChartKind::FlipAngle => seq.flip_angle,
        // Other charts have no single x for the snapshot, park the marker
        // at about two thirds of the grid.
        _ => {
            let idx = (series.len() as f64 * 0.65).floor() as usize;
            series.points.get(idx).map_or(0.0, |p| p.x)
        }
    };

    ChartOverlay {
        ernst_angle: (series.kind == ChartKind::FlipAngle).then(|| ernst_angle(seq.tr, gm.t1)),
        operating_point: (x, current),
    }
}
