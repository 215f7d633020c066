//! # Standings
//!
//! Turns grouped riders into ranked tables.
//!
//! The series runs four events. Which column a group is ranked by depends on
//! how far the series has progressed:
//!
//! | Events | Standing column |
//! |--------|-----------------|
//! | 1      | `tt1results`    |
//! | 2      | `cumulative2`   |
//! | 3      | `cumulative3`   |
//! | 4      | `ttseriestotal` |

use crate::bracket::GroupKey;
use crate::grouping::Groups;
use crate::{Gender, RaceTime, ResultCell, Rider};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::collections::btree_map::Entry;

// =============================================================================
// EVENT COUNT
// =============================================================================

/// Number of series events completed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventCount {
    One,
    Two,
    Three,
    Four,
}

impl EventCount {
    /// All event counts in order.
    pub const ALL: [EventCount; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Event count for a 1-based event number.
    #[must_use]
    pub fn from_number(n: usize) -> Option<Self> {
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    /// 1-based event number.
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Highest event for which any rider has a result entry.
    ///
    /// An entry is any non-empty cell, so a field of DNFs still counts as a
    /// completed event. `None` when nothing has been posted.
    #[must_use]
    pub fn detect<'a>(riders: impl IntoIterator<Item = &'a Rider>) -> Option<Self> {
        riders
            .into_iter()
            .filter_map(|rider| {
                rider
                    .events
                    .iter()
                    .rposition(ResultCell::has_entry)
                    .map(|idx| idx + 1)
            })
            .max()
            .and_then(Self::from_number)
    }

    /// The cell a rider is ranked by.
    #[must_use]
    pub fn standing_cell(self, rider: &Rider) -> &ResultCell {
        match self {
            Self::One => &rider.events[0],
            Self::Two => &rider.cumulative[0],
            Self::Three => &rider.cumulative[1],
            Self::Four => &rider.series_total,
        }
    }

    /// The time a rider is ranked by, if it parses.
    #[must_use]
    pub fn standing_time(self, rider: &Rider) -> Option<RaceTime> {
        self.standing_cell(rider).time
    }
}

// =============================================================================
// STANDINGS
// =============================================================================

/// A rider with their place in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRider {
    /// 1-based place.
    pub place: usize,
    pub rider: Rider,
}

/// Ranked riders for every group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standings {
    /// Event count the groups were ranked for.
    pub events: Option<EventCount>,
    /// Every group from the input, even those left with no ranked riders.
    pub groups: BTreeMap<GroupKey, Vec<RankedRider>>,
}

impl Standings {
    /// Rank every group.
    ///
    /// For each group:
    /// 1. Riders sharing a name collapse to their best standing time
    ///    (earliest entry on ties, any time beats no time).
    /// 2. Riders without a standing time are dropped.
    /// 3. Survivors are sorted ascending (stable) and numbered from 1.
    ///
    /// With no event count every group is kept but left empty.
    #[must_use]
    pub fn compute(groups: Groups, events: Option<EventCount>) -> Self {
        let groups = groups
            .into_iter()
            .map(|(key, riders)| {
                let ranked = match events {
                    Some(events) => rank_group(riders, events),
                    None => Vec::new(),
                };
                (key, ranked)
            })
            .collect();

        Self { events, groups }
    }

    /// Groups for one gender, in bracket order.
    pub fn for_gender(
        &self,
        gender: Gender,
    ) -> impl Iterator<Item = (&GroupKey, &Vec<RankedRider>)> {
        self.groups.iter().filter(move |(key, _)| key.gender == gender)
    }

    /// Total ranked riders across all groups.
    #[must_use]
    pub fn ranked_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

fn rank_group(riders: Vec<Rider>, events: EventCount) -> Vec<RankedRider> {
    // name -> index of the best entry so far
    let mut best: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, rider) in riders.iter().enumerate() {
        match best.entry(rider.name.as_str()) {
            Entry::Vacant(slot) => {
                slot.insert(idx);
            }
            Entry::Occupied(mut slot) => {
                let current = events.standing_time(&riders[*slot.get()]);
                if beats(events.standing_time(rider), current) {
                    slot.insert(idx);
                }
            }
        }
    }
    let keep: BTreeSet<usize> = best.into_values().collect();

    let mut timed: Vec<(RaceTime, Rider)> = riders
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| keep.contains(idx))
        .filter_map(|(_, rider)| events.standing_time(&rider).map(|t| (t, rider)))
        .collect();
    timed.sort_by_key(|(time, _)| *time);

    timed
        .into_iter()
        .enumerate()
        .map(|(idx, (_, rider))| RankedRider {
            place: idx + 1,
            rider,
        })
        .collect()
}

/// Strictly better: a time beats no time, a smaller time beats a larger one.
fn beats(candidate: Option<RaceTime>, current: Option<RaceTime>) -> bool {
    match (candidate, current) {
        (Some(c), Some(cur)) => c < cur,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
