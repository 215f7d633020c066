//! # Grouper
//!
//! Partitions riders by (gender, age bracket).
//!
//! Riders without a usable gender or age are skipped and reported back to
//! the caller rather than bucketed. The core never logs; the app decides
//! what to do with the skip list.

use crate::bracket::{AgeBracket, GroupKey};
use crate::standings::EventCount;
use crate::Rider;
use std::collections::BTreeMap;
use std::fmt;

/// Riders per group, ordered by group key.
pub type Groups = BTreeMap<GroupKey, Vec<Rider>>;

/// Why a rider was left out of every group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Gender cell empty or not `M`/`F`.
    MissingGender,
    /// Age cell empty or not a whole number.
    MissingAge,
    /// Age parsed but no bracket covers it.
    AgeOutOfRange(u32),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGender => write!(f, "missing or unrecognised gender"),
            Self::MissingAge => write!(f, "missing or non-numeric age"),
            Self::AgeOutOfRange(age) => write!(f, "age {age} outside every bracket"),
        }
    }
}

/// A rider the grouper could not place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRider {
    pub name: String,
    pub reason: SkipReason,
}

/// Output of [`Grouper::group`].
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    pub groups: Groups,
    pub skipped: Vec<SkippedRider>,
}

impl Grouping {
    /// Total riders placed in a group.
    #[must_use]
    pub fn grouped_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

pub struct Grouper;

impl Grouper {
    /// Resolve a rider's group key.
    pub fn key_for(rider: &Rider) -> Result<GroupKey, SkipReason> {
        let gender = rider.gender.ok_or(SkipReason::MissingGender)?;
        let age = rider.age.ok_or(SkipReason::MissingAge)?;
        let bracket = AgeBracket::for_age(age).ok_or(SkipReason::AgeOutOfRange(age))?;
        Ok(GroupKey::new(gender, bracket))
    }

    /// Event count posted by the riders that can be placed in a group.
    ///
    /// Riders that [`key_for`](Self::key_for) rejects are ignored.
    #[must_use]
    pub fn events_for(riders: &[Rider]) -> Option<EventCount> {
        EventCount::detect(riders.iter().filter(|r| Self::key_for(r).is_ok()))
    }

    /// Partition riders into groups.
    ///
    /// Each group is sorted by the standing time for `events`, ascending.
    /// The sort is stable: equal times keep input order, and riders with no
    /// time go last in input order. With no event count, input order is kept.
    #[must_use]
    pub fn group(riders: Vec<Rider>, events: Option<EventCount>) -> Grouping {
        let mut grouping = Grouping::default();

        for rider in riders {
            match Self::key_for(&rider) {
                Ok(key) => grouping.groups.entry(key).or_default().push(rider),
                Err(reason) => grouping.skipped.push(SkippedRider {
                    name: rider.name,
                    reason,
                }),
            }
        }

        if let Some(events) = events {
            for riders in grouping.groups.values_mut() {
                riders.sort_by_key(|r| match events.standing_time(r) {
                    Some(t) => (false, t.millis()),
                    None => (true, 0),
                });
            }
        }

        grouping
    }
}

// =============================================================================
// TESTS
// =============================================================================
