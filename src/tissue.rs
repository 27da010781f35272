//! Relaxation profiles of the brain tissues the simulator compares. Values
//! are typical literature numbers for gradient-echo imaging; they are fixed
//! and not loaded from anywhere.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, TissueParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tissue {
    #[serde(rename = "WM")]
    WhiteMatter,
    #[serde(rename = "GM")]
    GrayMatter,
    #[serde(rename = "CSF")]
    Csf,
    #[serde(rename = "FAT")]
    Fat,
}

impl Tissue {
    /// In catalog order, which is also the order of the curve series.
    pub const ALL: [Tissue; 4] = [
        Tissue::WhiteMatter,
        Tissue::GrayMatter,
        Tissue::Csf,
        Tissue::Fat,
    ];

    /// Short key used as series name in charts.
    pub fn key(self) -> &'static str {
        match self {
            Tissue::WhiteMatter => "WM",
            Tissue::GrayMatter => "GM",
            Tissue::Csf => "CSF",
            Tissue::Fat => "FAT",
        }
    }

    pub fn params(self) -> TissueParams {
        match self {
            Tissue::WhiteMatter => TissueParams {
                t1: 600.0,
                t2: 80.0,
                t2star: 60.0,
                pd: 0.72,
            },
            Tissue::GrayMatter => TissueParams {
                t1: 950.0,
                t2: 100.0,
                t2star: 70.0,
                pd: 0.86,
            },
            Tissue::Csf => TissueParams {
                t1: 4500.0,
                t2: 2200.0,
                t2star: 400.0,
                pd: 1.0,
            },
            Tissue::Fat => TissueParams {
                t1: 250.0,
                t2: 85.0,
                t2star: 60.0,
                pd: 0.95,
            },
        }
    }
}

impl fmt::Display for Tissue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tissue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WM" | "WHITE MATTER" | "WHITE-MATTER" => Ok(Tissue::WhiteMatter),
            "GM" | "GRAY MATTER" | "GRAY-MATTER" | "GREY MATTER" => Ok(Tissue::GrayMatter),
            "CSF" => Ok(Tissue::Csf),
            "FAT" => Ok(Tissue::Fat),
            _ => Err(Error::UnknownTissue(s.to_owned())),
        }
    }
}

/// An ordered set of tissues. Curve series are emitted in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct TissueCatalog {
    entries: Vec<(Tissue, TissueParams)>,
}

impl TissueCatalog {
    /// WM, GM, CSF and fat with their built-in relaxation times.
    pub fn standard() -> Self {
        Self {
            entries: Tissue::ALL.iter().map(|&t| (t, t.params())).collect(),
        }
    }

    /// Catalog with only the given tissues, in the given order. Duplicates
    /// are dropped.
    pub fn with_tissues(tissues: &[Tissue]) -> Self {
        let mut entries: Vec<(Tissue, TissueParams)> = Vec::with_capacity(tissues.len());
        for &t in tissues {
            if !entries.iter().any(|(e, _)| *e == t) {
                entries.push((t, t.params()));
            }
        }
        Self { entries }
    }

    pub fn get(&self, tissue: Tissue) -> Option<&TissueParams> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tissue)
            .map(|(_, p)| p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tissue, &TissueParams)> + '_ {
        self.entries.iter().map(|(t, p)| (*t, p))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(t, _)| t.key())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TissueCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
