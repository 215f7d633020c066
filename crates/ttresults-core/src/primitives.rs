//! # Fixed Tables
//!
//! Compile-time constants for the results pipeline. These never change at
//! runtime; a new season means a new build.

/// Age brackets as closed `(low, high)` ranges, in report order.
///
/// Ages outside every bracket are not grouped.
pub const AGE_BRACKETS: [(u32, u32); 18] = [
    (10, 14),
    (15, 19),
    (20, 24),
    (25, 29),
    (30, 34),
    (35, 39),
    (40, 44),
    (45, 49),
    (50, 54),
    (55, 59),
    (60, 64),
    (65, 69),
    (70, 74),
    (75, 79),
    (80, 84),
    (85, 89),
    (90, 94),
    (95, 99),
];

// =============================================================================
// SHEET COLUMNS
// =============================================================================

pub const COL_AGE: &str = "age";
pub const COL_GENDER: &str = "gender";
pub const COL_NAME: &str = "ridername";
pub const COL_CITY: &str = "city";
pub const COL_STATE: &str = "state";
pub const COL_CLUB: &str = "club";

/// Per-event result columns, TT #1 through TT #4.
pub const COL_EVENTS: [&str; 4] = ["tt1results", "tt2results", "tt3results", "tt4results"];

/// Cumulative columns after event 2 and event 3.
pub const COL_CUMULATIVE: [&str; 2] = ["cumulative2", "cumulative3"];

pub const COL_SERIES_TOTAL: &str = "ttseriestotal";

/// Every column the ingestor reads. Anything else in the sheet is ignored.
pub const RESULT_KEYS: [&str; 13] = [
    COL_AGE,
    COL_GENDER,
    COL_NAME,
    COL_CITY,
    COL_STATE,
    COL_CLUB,
    COL_EVENTS[0],
    COL_EVENTS[1],
    COL_EVENTS[2],
    COL_EVENTS[3],
    COL_CUMULATIVE[0],
    COL_CUMULATIVE[1],
    COL_SERIES_TOTAL,
];

/// Rider-name text that marks a repeated header row inside the sheet.
pub const HEADER_ROW_MARKER: &str = "RIDER NAME";

// =============================================================================
// REPORT LAYOUT
// =============================================================================

pub const WIDTH_PLACE: usize = 5;
pub const WIDTH_NAME: usize = 20;
pub const WIDTH_CITY: usize = 20;
pub const WIDTH_STATE: usize = 3;
pub const WIDTH_CLUB: usize = 35;
pub const WIDTH_TIME: usize = 12;

/// Subject line of the contact `mailto:` link.
pub const CONTACT_SUBJECT: &str = "Age Group TT Results Issue";
