//! # Ingestor Module
//!
//! Row coercion for the results sheet.
//!
//! - Turn raw cell text into typed `Rider` values
//! - Drop rows that are not riders (blank names, repeated header rows)
//! - No validation beyond type coercion; demographic checks belong to the `Grouper`

use crate::primitives::{
    COL_AGE, COL_CITY, COL_CLUB, COL_CUMULATIVE, COL_EVENTS, COL_GENDER, COL_NAME, COL_SERIES_TOTAL,
    COL_STATE, HEADER_ROW_MARKER,
};
use crate::{Gender, RawRow, ResultCell, Rider};

/// The Ingestor converts sheet rows into riders.
pub struct Ingestor;

impl Ingestor {
    /// Check whether a row describes a rider at all.
    ///
    /// A row is skipped if:
    /// - The rider name is empty
    /// - The rider name contains the header marker (`RIDER NAME`)
    #[must_use]
    pub fn is_rider_row(row: &RawRow) -> bool {
        let name = row.get(COL_NAME).trim();
        !name.is_empty() && !name.contains(HEADER_ROW_MARKER)
    }

    /// Coerce a single row. Returns `None` for non-rider rows.
    #[must_use]
    pub fn ingest_row(row: &RawRow) -> Option<Rider> {
        if !Self::is_rider_row(row) {
            return None;
        }

        let text = |column: &str| row.get(column).trim().to_string();
        let cell = |column: &str| ResultCell::from_cell(row.get(column));

        Some(Rider {
            name: text(COL_NAME),
            gender: Gender::from_cell(row.get(COL_GENDER)),
            age: row.get(COL_AGE).trim().parse().ok(),
            city: text(COL_CITY),
            state: text(COL_STATE),
            club: text(COL_CLUB),
            events: COL_EVENTS.map(cell),
            cumulative: COL_CUMULATIVE.map(cell),
            series_total: cell(COL_SERIES_TOTAL),
        })
    }

    /// Coerce a sequence of rows, preserving order.
    #[must_use]
    pub fn ingest_rows(rows: &[RawRow]) -> Vec<Rider> {
        rows.iter().filter_map(Self::ingest_row).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
