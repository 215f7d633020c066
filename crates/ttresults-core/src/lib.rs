//! # ttresults-core
//!
//! The deterministic results engine for ttresults - THE LOGIC.
//!
//! Rows come in as raw sheet cells and leave as an HTML standings page:
//!
//! ```text
//! RawRow ──Ingestor──▶ Rider ──Grouper──▶ Groups ──Standings──▶ Renderer ──▶ HTML
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no logging dependency: callers fetch rows and
//!   report skips themselves
//! - BTreeMap ordering everywhere, integer times, no clock reads
//! - Same rows and same `ReportMeta` produce byte-identical HTML

// =============================================================================
// MODULES
// =============================================================================

pub mod bracket;
pub mod formats;
pub mod grouping;
pub mod ingestor;
pub mod primitives;
pub mod report;
pub mod standings;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Gender, RaceTime, RawRow, ResultCell, Rider, TtResultsError};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use bracket::{AgeBracket, GroupKey};
pub use grouping::{Grouper, Grouping, Groups, SkipReason, SkippedRider};
pub use ingestor::Ingestor;
pub use report::{Renderer, ReportMeta, render_report};
pub use standings::{EventCount, RankedRider, Standings};
