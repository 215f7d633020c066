//! # ttresults - Time Trial Results Publisher
//!
//! Downloads the series results spreadsheet and writes an HTML page of
//! age-group standings.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 apps/ttresults (THE BINARY)                 │
//! │                                                             │
//! │  ┌─────────────┐    ┌──────────────────┐    ┌───────────┐   │
//! │  │   CLI       │    │ Spreadsheet feed │    │  Config   │   │
//! │  │  (clap)     │    │    (reqwest)     │    │  (toml)   │   │
//! │  └──────┬──────┘    └────────┬─────────┘    └─────┬─────┘   │
//! │         └────────────────────┼────────────────────┘         │
//! │                              ▼                              │
//! │                     ┌────────────────┐                      │
//! │                     │ ttresults-core │                      │
//! │                     │  (THE LOGIC)   │                      │
//! │                     └────────────────┘                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! ttresults --user coach@example.com --pw secret \
//!     --name "Rick" --email rick@example.com -o public/index.html
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ttresults::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Usage errors exit 2 from here, before logging is set up.
    let cli = cli::Cli::parse();

    init_tracing(cli.verbose);

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the stderr subscriber. TTRESULTS_LOG_FORMAT=json enables
/// machine-parseable output.
fn init_tracing(verbose: bool) {
    let log_format = std::env::var("TTRESULTS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if verbose {
        "ttresults=debug,ttresults_core=debug"
    } else {
        "ttresults=info,ttresults_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
