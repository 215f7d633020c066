//! # Application Errors
//!
//! Everything that can end a run. `main` prints the `Display` text and exits 1.

use crate::client::ClientError;
use crate::config::ConfigError;
use thiserror::Error;
use ttresults_core::TtResultsError;

/// Terminal failure of a report run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Login, lookup or download against the spreadsheet service failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Rendering the report failed.
    #[error(transparent)]
    Core(#[from] TtResultsError),

    /// The config file could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output path rejected or the write failed.
    #[error("I/O error: {0}")]
    Io(String),
}
