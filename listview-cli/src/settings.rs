//! User settings read from `settings.json`.

use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::Path;

use listview_lib::query::DEFAULT_ITEMS_PER_PAGE;
use listview_lib::screen::DEFAULT_EMPTY_MESSAGE;
use serde::Deserialize;
use serde::Serialize;
use simplelog::LevelFilter;

use crate::error::CliError;

/// Defaults for every run. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub items_per_page: NonZeroUsize,
    pub empty_message: String,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| CliError::json(path, e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CliError::read(path, e)),
        }
    }

    /// Returns the configured log level, falling back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
