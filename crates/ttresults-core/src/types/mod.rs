//! # Core Type Definitions
//!
//! This module contains all core types for the results pipeline:
//! - Sheet input (`RawRow`)
//! - Typed rider entries (`Rider`, `Gender`, `ResultCell`, `RaceTime`)
//! - Error types (`TtResultsError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (times are whole milliseconds)
//! - Implement `Ord` where they are used as keys in `BTreeMap`
//! - Never consult the clock or the environment

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// RAW ROW
// =============================================================================

/// One spreadsheet row exactly as the service delivered it.
///
/// Keys are the service's normalised column names (`ridername`, `tt1results`,
/// ...). Cell text is kept verbatim; coercion happens in the `Ingestor`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    cells: BTreeMap<String, String>,
}

impl RawRow {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, replacing any earlier value for the column.
    pub fn insert(&mut self, column: impl Into<String>, text: impl Into<String>) {
        self.cells.insert(column.into(), text.into());
    }

    /// Builder form of [`RawRow::insert`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(column, text);
        self
    }

    /// Cell text for a column; missing columns read as empty.
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    /// Number of populated columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the row has no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

// =============================================================================
// GENDER
// =============================================================================

/// Competition gender. Men sort before Women.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// Both genders in report order.
    pub const ALL: [Gender; 2] = [Gender::Men, Gender::Women];

    /// Coerce a sheet cell: `M` or `F`, trimmed, any case.
    #[must_use]
    pub fn from_cell(text: &str) -> Option<Self> {
        match text.trim() {
            t if t.eq_ignore_ascii_case("m") => Some(Self::Men),
            t if t.eq_ignore_ascii_case("f") => Some(Self::Women),
            _ => None,
        }
    }

    /// Upper-case label used in group headings and anchors (`MEN`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Men => "MEN",
            Self::Women => "WOMEN",
        }
    }

    /// Tab title (`Men`).
    #[must_use]
    pub const fn tab_label(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
        }
    }

    /// Tab element id (`men`).
    #[must_use]
    pub const fn tab_id(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// RACE TIME
// =============================================================================

/// A finish or cumulative time in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RaceTime(pub u64);

impl RaceTime {
    /// Build from whole milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Raw millisecond value.
    #[must_use]
    pub const fn millis(self) -> u64 {
        self.0
    }
}

/// Parses `[[h:]m:]s[.fraction]`.
///
/// Fractions beyond millisecond precision are truncated. Minutes and seconds
/// below a larger unit must be under 60.
impl FromStr for RaceTime {
    type Err = TtResultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TtResultsError::InvalidTime(s.to_string());
        let text = s.trim();
        if text.is_empty() {
            return Err(invalid());
        }

        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() > 3 {
            return Err(invalid());
        }

        let (last, leading) = parts.split_last().ok_or_else(invalid)?;
        let (secs_text, frac_text) = match last.split_once('.') {
            Some((secs, frac)) => (secs, frac),
            None => (*last, ""),
        };

        let secs = parse_digits(secs_text).ok_or_else(invalid)?;
        if !leading.is_empty() && secs >= 60 {
            return Err(invalid());
        }

        if !frac_text.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let mut millis = 0u64;
        for (i, c) in frac_text.chars().chain("000".chars()).take(3).enumerate() {
            let digit = u64::from(c.to_digit(10).ok_or_else(invalid)?);
            millis += digit * [100, 10, 1][i];
        }

        let mut total_secs = secs;
        for (idx, field) in leading.iter().rev().enumerate() {
            let value = parse_digits(field).ok_or_else(invalid)?;
            // idx 0 = minutes, idx 1 = hours
            if idx == 0 && leading.len() == 2 && value >= 60 {
                return Err(invalid());
            }
            let unit = if idx == 0 { 60 } else { 3600 };
            total_secs = value
                .checked_mul(unit)
                .and_then(|v| v.checked_add(total_secs))
                .ok_or_else(invalid)?;
        }

        total_secs
            .checked_mul(1000)
            .and_then(|v| v.checked_add(millis))
            .map(Self)
            .ok_or_else(invalid)
    }
}

/// Non-empty run of ASCII digits.
fn parse_digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.0 % 1000;
        let total_secs = self.0 / 1000;
        let (hours, mins, secs) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
        if hours > 0 {
            write!(f, "{hours}:{mins:02}:{secs:02}.{millis:03}")
        } else {
            write!(f, "{mins}:{secs:02}.{millis:03}")
        }
    }
}

// =============================================================================
// RESULT CELL
// =============================================================================

/// A result column: the text as published plus its coerced time, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultCell {
    /// Trimmed cell text, shown verbatim in the report.
    pub raw: String,
    /// Parsed time. `None` for empty, DNS, DNF or unparseable cells.
    pub time: Option<RaceTime>,
}

impl ResultCell {
    /// Coerce a sheet cell.
    #[must_use]
    pub fn from_cell(text: &str) -> Self {
        let raw = text.trim().to_string();
        let time = raw.parse::<RaceTime>().ok();
        Self { raw, time }
    }

    /// True if the cell carries any text, even a non-time like `DNF`.
    #[must_use]
    pub fn has_entry(&self) -> bool {
        !self.raw.is_empty()
    }
}

// =============================================================================
// RIDER
// =============================================================================

/// One typed entry from the results sheet.
///
/// Gender and age stay optional here; the `Grouper` decides what happens to
/// riders that lack them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rider {
    pub name: String,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub city: String,
    pub state: String,
    pub club: String,
    /// Per-event results, TT #1 through TT #4.
    pub events: [ResultCell; 4],
    /// Cumulative totals after event 2 and event 3.
    pub cumulative: [ResultCell; 2],
    /// Series total after event 4.
    pub series_total: ResultCell,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the results core.
///
/// - No silent failures
/// - Use `Result<T, TtResultsError>` for fallible operations
/// - The core should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum TtResultsError {
    /// A cell could not be read as a race time.
    #[error("Invalid race time: {0:?}")]
    InvalidTime(String),

    /// The report template failed to compile or render.
    #[error("Template error: {0}")]
    Template(String),
}

// =============================================================================
// TESTS
// =============================================================================
