//! # Age Brackets
//!
//! Lookup over the fixed bracket table in [`crate::primitives::AGE_BRACKETS`].

use crate::primitives::AGE_BRACKETS;
use crate::Gender;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed age range from the bracket table.
///
/// Ordered by lower bound, which is also report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgeBracket {
    pub low: u32,
    pub high: u32,
}

impl AgeBracket {
    /// The bracket containing `age`, if the table has one.
    #[must_use]
    pub fn for_age(age: u32) -> Option<Self> {
        AGE_BRACKETS
            .iter()
            .find(|(low, high)| (*low..=*high).contains(&age))
            .map(|&(low, high)| Self { low, high })
    }

    /// Every bracket in the table, in order.
    pub fn all() -> impl Iterator<Item = Self> {
        AGE_BRACKETS
            .iter()
            .map(|&(low, high)| Self { low, high })
    }

    /// Check whether `age` falls in this bracket.
    #[must_use]
    pub fn contains(&self, age: u32) -> bool {
        (self.low..=self.high).contains(&age)
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

// =============================================================================
// GROUP KEY
// =============================================================================

/// The (gender, bracket) pair a rider is grouped under.
///
/// Ordering is Men before Women, then by bracket: the order groups appear in
/// the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub gender: Gender,
    pub bracket: AgeBracket,
}

impl GroupKey {
    #[must_use]
    pub const fn new(gender: Gender, bracket: AgeBracket) -> Self {
        Self { gender, bracket }
    }

    /// Element id for the group's block, e.g. `MEN_10_14`.
    #[must_use]
    pub fn anchor(&self) -> String {
        format!(
            "{}_{}_{}",
            self.gender.label(),
            self.bracket.low,
            self.bracket.high
        )
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.gender, self.bracket)
    }
}
