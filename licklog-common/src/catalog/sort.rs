//! Collection sorter
//!
//! Two grouping strategies (tonality, artist) build labelled sub-collections;
//! two date strategies build one flat list, most recent first.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::db::models::Lick;
use crate::Error;

/// Label of the synthesized group for licks without tonalities
pub const NO_TONALITY: &str = "No Tonality";

/// Label of the synthesized group for licks without an artist
pub const NO_ARTIST: &str = "No Artist";

/// Group label to licks, in first-occurrence order of the labels
pub type LickGroups = IndexMap<String, Vec<Lick>>;

/// The two shapes a renderer has to handle
///
/// Serializes as a JSON array (flat) or a JSON object (grouped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortedLicks {
    Flat(Vec<Lick>),
    Grouped(LickGroups),
}

impl SortedLicks {
    /// Number of entries a renderer will list, duplicates included
    pub fn entry_count(&self) -> usize {
        match self {
            Self::Flat(licks) => licks.len(),
            Self::Grouped(groups) => groups.values().map(Vec::len).sum(),
        }
    }
}

/// Fixed set of sort options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortStrategy {
    /// Insertion order
    #[default]
    None,
    Tonality,
    Artist,
    LastPracticed,
    ScheduledPractice,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 5] = [
        Self::None,
        Self::Tonality,
        Self::Artist,
        Self::LastPracticed,
        Self::ScheduledPractice,
    ];

    /// Selector label, also the wire value
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Tonality => "Tonality",
            Self::Artist => "Artist",
            Self::LastPracticed => "Date Last Practiced",
            Self::ScheduledPractice => "Scheduled Practice Date",
        }
    }

    /// Grouping strategies produce [`SortedLicks::Grouped`]
    pub fn is_grouping(self) -> bool {
        matches!(self, Self::Tonality | Self::Artist)
    }

    pub fn is_date(self) -> bool {
        matches!(self, Self::LastPracticed | Self::ScheduledPractice)
    }

    /// Labels for the sort selector, "" first
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|s| s.label().to_string()).collect()
    }
}

impl FromStr for SortStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::None);
        }
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.label() == s)
            .ok_or_else(|| Error::InvalidSortStrategy(s.to_string()))
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            other => f.write_str(other.label()),
        }
    }
}

/// Reorder or group `collection` by `strategy`
pub fn sort_licks(collection: Vec<Lick>, strategy: SortStrategy) -> SortedLicks {
    match strategy {
        SortStrategy::None => SortedLicks::Flat(collection),
        SortStrategy::Tonality => SortedLicks::Grouped(group_by_tonality(&collection)),
        SortStrategy::Artist => SortedLicks::Grouped(group_by_artist(&collection)),
        SortStrategy::LastPracticed => {
            SortedLicks::Flat(sort_by_date(collection, |l| l.last_practiced))
        }
        SortStrategy::ScheduledPractice => {
            SortedLicks::Flat(sort_by_date(collection, |l| l.scheduled_practice))
        }
    }
}

/// A lick appears under every one of its tonalities
fn group_by_tonality(collection: &[Lick]) -> LickGroups {
    let mut groups = LickGroups::new();
    let mut untagged = Vec::new();

    for lick in collection {
        if lick.tonalities.is_empty() {
            untagged.push(lick.clone());
            continue;
        }
        let mut seen: Vec<&str> = Vec::with_capacity(lick.tonalities.len());
        for name in lick.tonality_names() {
            if seen.contains(&name) {
                continue;
            }
            seen.push(name);
            groups.entry(name.to_string()).or_default().push(lick.clone());
        }
    }

    append_synthesized(&mut groups, NO_TONALITY, untagged);
    groups
}

fn group_by_artist(collection: &[Lick]) -> LickGroups {
    let mut groups = LickGroups::new();
    let mut unattributed = Vec::new();

    for lick in collection {
        match lick.artist_name() {
            Some(name) => groups.entry(name.to_string()).or_default().push(lick.clone()),
            None => unattributed.push(lick.clone()),
        }
    }

    append_synthesized(&mut groups, NO_ARTIST, unattributed);
    groups
}

/// The synthesized group only exists when it has members and always comes last
///
/// A real tag or artist with the same label is merged into it: its licks
/// stay first, followed by the untagged ones.
fn append_synthesized(groups: &mut LickGroups, label: &str, licks: Vec<Lick>) {
    if licks.is_empty() {
        return;
    }
    let mut merged = groups.shift_remove(label).unwrap_or_default();
    merged.extend(licks);
    groups.insert(label.to_string(), merged);
}

/// Dated licks newest first, then undated licks in their original order
///
/// Ties keep insertion order (stable sort). With no dated lick at all the
/// collection comes back untouched.
fn sort_by_date<F>(collection: Vec<Lick>, date_of: F) -> Vec<Lick>
where
    F: Fn(&Lick) -> Option<DateTime<Utc>>,
{
    let (mut dated, undated): (Vec<Lick>, Vec<Lick>) =
        collection.into_iter().partition(|l| date_of(l).is_some());

    if dated.is_empty() {
        return undated;
    }

    dated.sort_by(|a, b| date_of(b).cmp(&date_of(a)));
    dated.extend(undated);
    dated
}
