use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong outside of the numeric core. Signal, k-space
/// and magnetization evaluation never fail, they fall back to zero instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown sequence type {0:?}, expected one of: spoiled, bssfp, fisp, inversion")]
    UnknownSequenceType(String),

    #[error("Unknown chart kind {0:?}")]
    UnknownChartKind(String),

    #[error("Unknown tissue {0:?}, expected one of: WM, GM, CSF, FAT")]
    UnknownTissue(String),

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid config value for {field}: {message}")]
    InvalidConfig {
        field: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
