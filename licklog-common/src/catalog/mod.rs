//! Filter/sort/group engine for a user's lick collection
//!
//! Pipeline: [`filter_licks`] narrows the collection by one optional
//! criterion, [`sort_licks`] reorders or groups it, and [`present_groups`]
//! prunes a grouped result down to the header the filter asked for.
//!
//! The engine works on an owned snapshot; it never touches the database.

mod filter;
mod options;
mod practice;
mod present;
mod sort;

pub use filter::{filter_licks, FilterCriterion};
pub use options::{filter_options, FilterOptions};
pub use practice::{
    licks_of_the_day, overdue_licks, practice_dashboard, sloppiest_licks, SLOPPIEST_LIMIT,
    SLOPPY_RATING_MAX,
};
pub use present::present_groups;
pub use sort::{sort_licks, LickGroups, SortStrategy, SortedLicks, NO_ARTIST, NO_TONALITY};

use std::collections::HashSet;
use tracing::debug;

use crate::api::types::LickQuery;
use crate::db::models::Lick;
use crate::Result;

/// Filter then sort, as the index endpoint does
///
/// The sort label is parsed first so an unknown strategy fails even when
/// the filter leaves nothing to sort.
pub fn filter_and_sort(
    collection: Vec<Lick>,
    query: &LickQuery,
    known_artists: &HashSet<String>,
) -> Result<SortedLicks> {
    let strategy: SortStrategy = query.sort.parse()?;
    let filtered = filter_licks(collection, &query.filter, known_artists);
    debug!(
        filter = %query.filter,
        sort = %strategy,
        remaining = filtered.len(),
        "Filtered lick collection"
    );
    Ok(sort_licks(filtered, strategy))
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::Error;

    fn artists(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_filter_then_group_then_present() {
        let collection = vec![
            with_artist(with_tonalities(lick(1, "A"), &["Dorian", "Aeolian"]), "Miles Davis"),
            with_tonalities(lick(2, "B"), &["Aeolian"]),
            with_artist(lick(3, "C"), "Miles Davis"),
        ];
        let query = LickQuery::new("Dorian", "Tonality");

        let sorted = filter_and_sort(collection, &query, &artists(&["Miles Davis"])).unwrap();
        let SortedLicks::Grouped(groups) = sorted else {
            panic!("tonality sort must group");
        };
        // lick A also carries Aeolian, so the unfiltered grouping has two headers
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["Dorian", "Aeolian"]);

        let presented = present_groups(groups, &query.filter);
        assert_eq!(presented.keys().collect::<Vec<_>>(), vec!["Dorian"]);
        assert_eq!(ids(&presented["Dorian"]), vec![1]);
    }

    #[test]
    fn test_unknown_sort_fails_even_for_empty_result() {
        let query = LickQuery::new("Nobody", "Genre");
        let result = filter_and_sort(vec![lick(1, "A")], &query, &HashSet::new());
        assert!(matches!(result, Err(Error::InvalidSortStrategy(s)) if s == "Genre"));
    }

    #[test]
    fn test_example_collection() {
        let a = with_tonalities(lick(1, "A"), &["Dorian"]);
        let a = Lick {
            last_practiced: Some(date(2024, 1, 10)),
            ..a
        };
        let b = with_tonalities(lick(2, "B"), &["Dorian"]);
        let c = Lick {
            last_practiced: Some(date(2024, 3, 1)),
            ..lick(3, "C")
        };
        let collection = vec![a, b, c];

        let grouped = filter_and_sort(
            collection.clone(),
            &LickQuery::new("", "Tonality"),
            &HashSet::new(),
        )
        .unwrap();
        let SortedLicks::Grouped(groups) = grouped else {
            panic!("expected groups");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(ids(&groups["Dorian"]), vec![1, 2]);
        assert_eq!(ids(&groups[NO_TONALITY]), vec![3]);

        let dated = filter_and_sort(
            collection,
            &LickQuery::new("", "Date Last Practiced"),
            &HashSet::new(),
        )
        .unwrap();
        let SortedLicks::Flat(licks) = dated else {
            panic!("expected flat list");
        };
        assert_eq!(ids(&licks), vec![3, 1, 2]);
    }
}
