//! Optional `pile.toml` settings: input defaults and report formatting.
//!
//! ```toml
//! [defaults]
//! factor_of_safety = 2.5
//! k_value = 3.0
//!
//! [output]
//! format = "table"
//! precision = 2
//! show_kips = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::debug;
use pile_core::input::InputDefaults;
use pile_core::report::ReportOptions;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "pile.toml";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain-text report with a per-layer table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Output section of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub precision: usize,
    pub show_kips: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        let report = ReportOptions::default();
        Self {
            format: OutputFormat::Table,
            precision: report.precision,
            show_kips: report.show_kips,
        }
    }
}

impl OutputSettings {
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            precision: self.precision,
            show_kips: self.show_kips,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub defaults: InputDefaults,
    pub output: OutputSettings,
}

impl Config {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load the config file, or defaults when there is none.
///
/// An explicitly requested file must exist; the implicit `pile.toml` is
/// optional.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config, CliError> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                debug!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                return Ok(Config::default());
            }
            path
        }
    };

    let content = fs::read_to_string(&path)?;
    let cfg = Config::from_toml_str(&content, &path)?;
    debug!("loaded config from {}", path.display());
    Ok(cfg)
}
