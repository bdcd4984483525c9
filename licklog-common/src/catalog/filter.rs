//! Collection filter

use std::collections::HashSet;

use crate::db::models::Lick;

/// How a raw filter value was understood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCriterion<'a> {
    /// Blank selection: keep everything
    Unfiltered,
    /// Matches an artist known to the catalog
    Artist(&'a str),
    /// Anything else is taken as a tonality name
    Tonality(&'a str),
}

impl<'a> FilterCriterion<'a> {
    /// Artist names win over tonality names
    pub fn resolve(raw: &'a str, known_artists: &HashSet<String>) -> Self {
        if raw.trim().is_empty() {
            Self::Unfiltered
        } else if known_artists.contains(raw) {
            Self::Artist(raw)
        } else {
            Self::Tonality(raw)
        }
    }

    pub fn matches(&self, lick: &Lick) -> bool {
        match self {
            Self::Unfiltered => true,
            Self::Artist(name) => lick.artist_name() == Some(*name),
            Self::Tonality(name) => lick.has_tonality(name),
        }
    }
}

/// Narrow a collection to the licks matching `criterion`
///
/// A criterion that matches nothing yields an empty collection, never an error.
pub fn filter_licks(collection: Vec<Lick>, criterion: &str, known_artists: &HashSet<String>) -> Vec<Lick> {
    match FilterCriterion::resolve(criterion, known_artists) {
        FilterCriterion::Unfiltered => collection,
        resolved => collection.into_iter().filter(|l| resolved.matches(l)).collect(),
    }
}
