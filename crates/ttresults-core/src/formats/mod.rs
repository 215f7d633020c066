//! # Output Formats
//!
//! Plain-text layouts embedded in the HTML report.

pub mod table;

pub use table::{Column, EMPTY_GROUP_TEXT, columns, group_table, table_width};
