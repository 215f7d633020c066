//! # ttresults CLI Module
//!
//! Flags for a single report run. There are no subcommands: every
//! invocation logs in, downloads the sheet and writes the HTML page.

mod commands;

use crate::config::AppConfig;
use crate::error::AppError;
use clap::Parser;
use std::path::{Path, PathBuf};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// ttresults - indoor time-trial series standings
///
/// Downloads the results spreadsheet and publishes an HTML page of
/// age-group standings.
#[derive(Parser, Debug)]
#[command(name = "ttresults")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Spreadsheet service account (email address)
    #[arg(long)]
    pub user: String,

    /// Spreadsheet service password
    #[arg(long)]
    pub pw: String,

    /// Contact name shown on the page
    #[arg(long)]
    pub name: String,

    /// Contact email shown on the page
    #[arg(long)]
    pub email: String,

    /// Spreadsheet title (overrides the config file)
    #[arg(long)]
    pub spreadsheet: Option<String>,

    /// Output HTML file (overrides the config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the summary printed on success
    #[arg(short, long)]
    pub quiet: bool,
}

/// A fully resolved report run: credentials, contact, and merged config.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    pub user: String,
    pub password: String,
    pub contact_name: String,
    pub contact_email: String,
    pub config: AppConfig,
}

impl ReportRequest {
    /// Merge flags over the config loaded relative to `dir`.
    pub fn resolve(cli: &Cli, dir: &Path) -> Result<Self, AppError> {
        let mut config = AppConfig::load(cli.config.as_deref(), dir)?;
        if let Some(spreadsheet) = &cli.spreadsheet {
            config.report.spreadsheet = spreadsheet.clone();
        }
        if let Some(output) = &cli.output {
            config.report.output = output.clone();
        }

        Ok(Self {
            user: cli.user.clone(),
            password: cli.pw.clone(),
            contact_name: cli.name.clone(),
            contact_email: cli.email.clone(),
            config,
        })
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let request = ReportRequest::resolve(&cli, Path::new("."))?;
    cmd_report(&request, cli.quiet).await
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "ttresults",
        "--user",
        "coach@example.com",
        "--pw",
        "secret",
        "--name",
        "Rick",
        "--email",
        "rick@example.com",
    ];

    #[test]
    fn required_flags_parse() {
        let cli = Cli::try_parse_from(REQUIRED).expect("parse");
        assert_eq!(cli.user, "coach@example.com");
        assert_eq!(cli.pw, "secret");
        assert!(cli.output.is_none());
        assert!(!cli.verbose && !cli.quiet);
    }

    #[test]
    fn missing_required_flag_is_usage_error() {
        let err = Cli::try_parse_from(&REQUIRED[..7]).expect_err("email is required");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn flags_override_config() {
        let mut args = REQUIRED.to_vec();
        args.extend(["--spreadsheet", "2012_Series", "-o", "out/standings.html"]);
        let cli = Cli::try_parse_from(args).expect("parse");

        let dir = tempfile::tempdir().expect("tempdir");
        let request = ReportRequest::resolve(&cli, dir.path()).expect("resolve");
        assert_eq!(request.config.report.spreadsheet, "2012_Series");
        assert_eq!(
            request.config.report.output,
            PathBuf::from("out/standings.html")
        );
        assert_eq!(request.config.report.header, "2011 ABD INDOOR TIME TRIAL SERIES");
    }

    #[test]
    fn config_file_in_working_dir_is_picked_up() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("ttresults.toml"),
            "[report]\ntitle = \"2012 Results\"\n",
        )
        .expect("write config");

        let cli = Cli::try_parse_from(REQUIRED).expect("parse");
        let request = ReportRequest::resolve(&cli, dir.path()).expect("resolve");
        assert_eq!(request.config.report.title, "2012 Results");
        assert_eq!(request.config.report.spreadsheet, "2011_TTSeries_Reg_Results");
    }

    #[test]
    fn missing_explicit_config_is_error() {
        let mut args = REQUIRED.to_vec();
        args.extend(["-c", "/nonexistent/ttresults.toml"]);
        let cli = Cli::try_parse_from(args).expect("parse");

        let dir = tempfile::tempdir().expect("tempdir");
        let err = ReportRequest::resolve(&cli, dir.path()).expect_err("must fail");
        assert!(matches!(err, AppError::Config(_)));
    }
}
