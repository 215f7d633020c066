//! # Configuration
//!
//! Optional TOML file with two tables:
//!
//! ```toml
//! [service]
//! auth_url  = "https://www.google.com/accounts/ClientLogin"
//! feeds_url = "https://spreadsheets.google.com/feeds"
//! source    = "ABD TT Results Application"
//!
//! [report]
//! spreadsheet  = "2011_TTSeries_Reg_Results"
//! header       = "2011 ABD INDOOR TIME TRIAL SERIES"
//! title        = "2011 Indoor TT Results"
//! organization = "Athletes By Design"
//! output       = "index.html"
//! ```
//!
//! Every key is optional. Unknown keys are an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "ttresults.toml";

/// Errors while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file '{path}': {message}")]
    Read { path: PathBuf, message: String },

    #[error("Invalid config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

// =============================================================================
// SCHEMA
// =============================================================================

/// Full configuration, defaults filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub report: ReportConfig,
}

/// Where the spreadsheet service lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Login endpoint.
    pub auth_url: String,
    /// Base URL of the spreadsheet, worksheet and list feeds.
    pub feeds_url: String,
    /// Client identifier sent on login.
    pub source: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://www.google.com/accounts/ClientLogin".to_string(),
            feeds_url: "https://spreadsheets.google.com/feeds".to_string(),
            source: "ABD TT Results Application".to_string(),
        }
    }
}

/// What to fetch and how to label the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Spreadsheet title to look up.
    pub spreadsheet: String,
    /// Series name centred above each table.
    pub header: String,
    /// HTML document title.
    pub title: String,
    /// Footer copyright holder.
    pub organization: String,
    /// Where the HTML is written.
    pub output: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            spreadsheet: "2011_TTSeries_Reg_Results".to_string(),
            header: "2011 ABD INDOOR TIME TRIAL SERIES".to_string(),
            title: "2011 Indoor TT Results".to_string(),
            organization: "Athletes By Design".to_string(),
            output: PathBuf::from("index.html"),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Parse a config document.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&text, path)
    }

    /// Load the explicit file if given, else `ttresults.toml` in `dir` if it
    /// exists, else the defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            Self::from_file(&fallback)
        } else {
            Ok(Self::default())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
