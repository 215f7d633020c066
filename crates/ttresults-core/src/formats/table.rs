//! # Fixed-Width Results Table
//!
//! Lays out one group as the plain-text table shown inside `<pre>`: series
//! header, group label, headings, `=` rules, then one line per rider.
//!
//! The column set grows with the series:
//!
//! | Events | Time columns                         | Width |
//! |--------|--------------------------------------|-------|
//! | 1      | TT #1                                | 100   |
//! | 2      | TT #1, TT #2, Total                  | 126   |
//! | 3      | TT #1, TT #2, TT #3, Total           | 139   |
//! | 4      | TT #1, TT #2, TT #3, TT #4, Total    | 152   |

use crate::bracket::GroupKey;
use crate::primitives::{
    WIDTH_CITY, WIDTH_CLUB, WIDTH_NAME, WIDTH_PLACE, WIDTH_STATE, WIDTH_TIME,
};
use crate::standings::{EventCount, RankedRider};

/// Text shown in place of rows when a group has nobody ranked.
pub const EMPTY_GROUP_TEXT: &str = "No results posted yet.";

/// One table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub heading: String,
    pub width: usize,
}

impl Column {
    fn new(heading: impl Into<String>, width: usize) -> Self {
        Self {
            heading: heading.into(),
            width,
        }
    }
}

/// Columns for an event count. With no events yet, the single-event layout.
#[must_use]
pub fn columns(events: Option<EventCount>) -> Vec<Column> {
    let n = events.map_or(1, EventCount::number);

    let mut cols = vec![
        Column::new("Place", WIDTH_PLACE),
        Column::new("Name", WIDTH_NAME),
        Column::new("City", WIDTH_CITY),
        Column::new("St.", WIDTH_STATE),
        Column::new("Club", WIDTH_CLUB),
    ];
    for event in 1..=n {
        cols.push(Column::new(format!("TT #{event} Time"), WIDTH_TIME));
    }
    if n > 1 {
        cols.push(Column::new("Total Time", WIDTH_TIME));
    }
    cols
}

/// Full line width: column widths plus one separating space between each.
#[must_use]
pub fn table_width(columns: &[Column]) -> usize {
    let widths: usize = columns.iter().map(|c| c.width).sum();
    widths + columns.len().saturating_sub(1)
}

/// Cell values for one ranked rider, in column order.
#[must_use]
pub fn row_cells(entry: &RankedRider, events: Option<EventCount>) -> Vec<String> {
    let rider = &entry.rider;
    let n = events.map_or(1, EventCount::number);

    let mut cells = vec![
        entry.place.to_string(),
        rider.name.clone(),
        rider.city.clone(),
        rider.state.clone(),
        rider.club.clone(),
    ];
    cells.extend(rider.events.iter().take(n).map(|c| c.raw.clone()));
    if let Some(events) = events.filter(|_| n > 1) {
        cells.push(events.standing_cell(rider).raw.clone());
    }
    cells
}

/// Left-align each cell to its column and join with single spaces.
///
/// Cells wider than their column are kept whole, never truncated.
#[must_use]
pub fn format_line(columns: &[Column], cells: &[String]) -> String {
    let line = columns
        .iter()
        .zip(cells)
        .map(|(col, cell)| format!("{:<width$}", cell, width = col.width))
        .collect::<Vec<_>>()
        .join(" ");
    line.trim_end().to_string()
}

/// Centre `text` in `width` columns, without trailing padding.
///
/// An odd margin puts the extra space on the left when `width` is odd and
/// on the right when it is even.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let margin = width.saturating_sub(text.chars().count());
    let left = margin / 2 + (margin & width & 1);
    format!("{}{}", " ".repeat(left), text)
        .trim_end()
        .to_string()
}

/// Render a whole group table as newline-separated plain text.
#[must_use]
pub fn group_table(
    header: &str,
    key: &GroupKey,
    ranked: &[RankedRider],
    events: Option<EventCount>,
) -> String {
    let cols = columns(events);
    let width = table_width(&cols);

    let headings: Vec<String> = cols.iter().map(|c| c.heading.clone()).collect();
    let rules: Vec<String> = cols.iter().map(|c| "=".repeat(c.width)).collect();

    let mut lines = vec![
        center(header, width),
        center(&key.to_string(), width),
        String::new(),
        format_line(&cols, &headings),
        format_line(&cols, &rules),
    ];

    if ranked.is_empty() {
        lines.push(EMPTY_GROUP_TEXT.to_string());
    } else {
        lines.extend(
            ranked
                .iter()
                .map(|entry| format_line(&cols, &row_cells(entry, events))),
        );
    }

    lines.join("\n")
}
