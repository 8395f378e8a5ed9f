use std::path::PathBuf;

use listview_lib::error::ColumnError;
use listview_lib::error::ConfigError;
use thiserror::Error;

/// Errors that abort a `listview` run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid table configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid columns: {0}")]
    Column(#[from] ColumnError),

    #[error("Either --config or --preset is required")]
    MissingConfig,

    #[error("Unknown preset '{name}' (expected one of: {expected})")]
    UnknownPreset { name: String, expected: String },

    #[error("Invalid sort '{0}' (expected KEY-asc or KEY-desc)")]
    InvalidSort(String),

    #[error("Failed to initialize logging: {0}")]
    Logger(String),
}

impl CliError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
