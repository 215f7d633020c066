//! CLI command implementations.

use super::ReportRequest;
use crate::client::SpreadsheetClient;
use crate::error::AppError;
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use ttresults_core::{EventCount, Grouper, Ingestor, Renderer, ReportMeta, Standings};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub output: PathBuf,
    pub bytes: usize,
    pub rows: usize,
    pub riders: usize,
    pub skipped: usize,
    pub groups: usize,
    pub ranked: usize,
    pub events: Option<EventCount>,
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Validate that an output path is safe to write.
///
/// Resolves the parent directory and rejects paths whose parent does not
/// exist. Returns the path with a canonical parent.
fn validate_output_path(path: &Path) -> Result<PathBuf, AppError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        AppError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(AppError::Io(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| AppError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

/// Fetch, rank, render and write. Nothing is written unless every step
/// before the write succeeded.
pub async fn run_report(
    request: &ReportRequest,
    updated: NaiveDateTime,
) -> Result<ReportSummary, AppError> {
    let report = &request.config.report;
    let output = validate_output_path(&report.output)?;

    let mut client = SpreadsheetClient::new(request.config.service.clone());
    let rows = client
        .fetch_rows(&request.user, &request.password, &report.spreadsheet)
        .await?;

    let riders = Ingestor::ingest_rows(&rows);
    let events = Grouper::events_for(&riders);
    let rider_count = riders.len();
    match events {
        Some(events) => tracing::debug!("{} riders, {} events posted", rider_count, events.number()),
        None => tracing::debug!("{} riders, no events posted", rider_count),
    }

    let grouping = Grouper::group(riders, events);
    for skipped in &grouping.skipped {
        tracing::warn!("Skipping rider '{}': {}", skipped.name, skipped.reason);
    }
    let skipped = grouping.skipped.len();

    let standings = Standings::compute(grouping.groups, events);
    let meta = ReportMeta {
        title: report.title.clone(),
        header: report.header.clone(),
        organization: report.organization.clone(),
        contact_name: request.contact_name.clone(),
        contact_email: request.contact_email.clone(),
        updated,
    };
    let html = Renderer::new()?.render(&standings, &meta)?;

    std::fs::write(&output, &html)
        .map_err(|e| AppError::Io(format!("Write '{}': {}", output.display(), e)))?;
    tracing::info!("Wrote {} bytes to {}", html.len(), output.display());

    Ok(ReportSummary {
        output,
        bytes: html.len(),
        rows: rows.len(),
        riders: rider_count,
        skipped,
        groups: standings.groups.len(),
        ranked: standings.ranked_count(),
        events,
    })
}

/// Run the report stamped with the local time and print a summary.
pub async fn cmd_report(request: &ReportRequest, quiet: bool) -> Result<(), AppError> {
    let updated = chrono::Local::now().naive_local();
    let summary = run_report(request, updated).await?;

    if !quiet {
        println!(
            "Wrote {} ({} bytes): {} riders ranked in {} groups, {} skipped",
            summary.output.display(),
            summary.bytes,
            summary.ranked,
            summary.groups,
            summary.skipped
        );
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
