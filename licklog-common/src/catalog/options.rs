//! Filter selector options

use serde::{Deserialize, Serialize};

use crate::db::models::Lick;

/// Names offered by the filter selector, in two option groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub tonalities: Vec<String>,
    pub artists: Vec<String>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.tonalities.is_empty() && self.artists.is_empty()
    }
}

/// Tonality and artist names present in `licks`, de-duplicated in
/// first-occurrence order
pub fn filter_options(licks: &[Lick]) -> FilterOptions {
    let mut options = FilterOptions::default();

    for lick in licks {
        for name in lick.tonality_names() {
            push_unique(&mut options.tonalities, name);
        }
        if let Some(name) = lick.artist_name() {
            push_unique(&mut options.artists, name);
        }
    }

    options
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_options_are_unique_and_ordered() {
        let licks = vec![
            with_artist(with_tonalities(lick(1, "A"), &["Dorian", "Aeolian"]), "Joe Pass"),
            with_tonalities(lick(2, "B"), &["Aeolian", "Lydian"]),
            with_artist(lick(3, "C"), "Joe Pass"),
        ];

        let options = filter_options(&licks);
        assert_eq!(options.tonalities, vec!["Dorian", "Aeolian", "Lydian"]);
        assert_eq!(options.artists, vec!["Joe Pass"]);
    }

    #[test]
    fn test_no_licks_no_options() {
        assert!(filter_options(&[]).is_empty());
    }
}
