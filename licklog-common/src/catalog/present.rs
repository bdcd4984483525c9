//! Grouping presenter

use super::sort::LickGroups;

/// Keep only the group whose label equals the active filter
///
/// Every other group is dropped whole, even when its licks also belong to
/// the kept group. A blank filter passes the groups through unchanged.
pub fn present_groups(mut groups: LickGroups, filter: &str) -> LickGroups {
    if filter.trim().is_empty() {
        return groups;
    }
    groups.retain(|label, _| label == filter);
    groups
}
