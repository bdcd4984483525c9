//! Lick drafts: the closed set of fields a client may submit
//!
//! A draft is raw form input. [`LickDraft::validate`] normalizes blank
//! values to absent and turns the draft into a [`NewLick`], reporting every
//! offending field at once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::parse_form_date;
use crate::ValidationError;

/// Lowest and highest accepted performance rating
pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// Raw lick input as submitted by a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LickDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bpm: Option<String>,
    #[serde(default)]
    pub current_key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub performance_rating: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub last_practiced: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub scheduled_practice: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub new_tonalities: Vec<TonalityDraft>,
    #[serde(default)]
    pub new_backing_track: Option<BackingTrackDraft>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TonalityDraft {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackingTrackDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
}

/// A validated lick, ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLick {
    pub name: String,
    pub bpm: Option<i64>,
    pub current_key: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub performance_rating: Option<i64>,
    pub last_practiced: Option<DateTime<Utc>>,
    pub scheduled_practice: Option<DateTime<Utc>>,
    pub artist_name: Option<String>,
    /// Tonalities to find-or-create and attach, de-duplicated
    pub tonality_names: Vec<String>,
    /// Backing track to find-or-create and attach, as (name, link)
    pub backing_track: Option<(String, String)>,
}

impl LickDraft {
    /// Draft with only a name, the minimum a lick needs
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn validate(self) -> Result<NewLick, ValidationError> {
        let mut errors = ValidationError::default();

        let name = non_blank(self.name);
        if name.is_none() {
            errors.push("name", "can't be blank");
        }

        let bpm = match non_blank(self.bpm) {
            None => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    errors.push("bpm", "must be a positive whole number");
                    None
                }
            },
        };

        let performance_rating = match non_blank(self.performance_rating) {
            None => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(value) if RATING_RANGE.contains(&value) => Some(value),
                _ => {
                    errors.push("performance_rating", "must be a whole number from 1 to 5");
                    None
                }
            },
        };

        let last_practiced = parse_date_field(self.last_practiced, "last_practiced", &mut errors);
        let scheduled_practice =
            parse_date_field(self.scheduled_practice, "scheduled_practice", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut tonality_names: Vec<String> = Vec::new();
        for tonality in self.new_tonalities {
            if let Some(name) = non_blank(Some(tonality.name)) {
                if !tonality_names.contains(&name) {
                    tonality_names.push(name);
                }
            }
        }

        let backing_track = self.new_backing_track.and_then(|track| {
            match (non_blank(Some(track.name)), non_blank(Some(track.link))) {
                (Some(name), Some(link)) => Some((name, link)),
                _ => None,
            }
        });

        Ok(NewLick {
            name: name.unwrap_or_default(),
            bpm,
            current_key: non_blank(self.current_key),
            description: non_blank(self.description),
            link: non_blank(self.link),
            performance_rating,
            last_practiced,
            scheduled_practice,
            artist_name: non_blank(self.artist_name),
            tonality_names,
            backing_track,
        })
    }
}

/// Blank strings become absent
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_date_field(
    value: Option<String>,
    field: &'static str,
    errors: &mut ValidationError,
) -> Option<DateTime<Utc>> {
    let raw = non_blank(value)?;
    let parsed = parse_form_date(&raw);
    if parsed.is_none() {
        errors.push(field, "must be a date (YYYY-MM-DD)");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_blank_fields_become_absent() {
        let draft = LickDraft {
            name: Some("Minor ii-V".to_string()),
            bpm: Some("".to_string()),
            current_key: Some("   ".to_string()),
            description: Some(String::new()),
            link: Some(" ".to_string()),
            performance_rating: Some("".to_string()),
            ..LickDraft::default()
        };

        let lick = draft.validate().unwrap();
        assert_eq!(lick.name, "Minor ii-V");
        assert_eq!(lick.bpm, None);
        assert_eq!(lick.current_key, None);
        assert_eq!(lick.description, None);
        assert_eq!(lick.link, None);
        assert_eq!(lick.performance_rating, None);
    }

    #[test]
    fn test_every_offending_field_reported() {
        let draft = LickDraft {
            name: Some("  ".to_string()),
            bpm: Some("fast".to_string()),
            performance_rating: Some("6".to_string()),
            last_practiced: Some("yesterday".to_string()),
            ..LickDraft::default()
        };

        let err = draft.validate().unwrap_err();
        assert_eq!(
            err.field_names(),
            vec!["name", "bpm", "performance_rating", "last_practiced"]
        );
    }

    #[test]
    fn test_rating_bounds() {
        for (raw, ok) in [("0", false), ("1", true), ("5", true), ("3.5", false)] {
            let draft = LickDraft {
                performance_rating: Some(raw.to_string()),
                ..LickDraft::named("Bend")
            };
            assert_eq!(draft.validate().is_ok(), ok, "rating {raw}");
        }
    }

    #[test]
    fn test_dates_parsed_to_midnight_utc() {
        let draft = LickDraft {
            scheduled_practice: Some("2024-02-29".to_string()),
            ..LickDraft::named("Rake")
        };
        let lick = draft.validate().unwrap();
        assert_eq!(
            lick.scheduled_practice,
            Some(Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap())
        );
        assert_eq!(lick.last_practiced, None);
    }

    #[test]
    fn test_new_tonalities_skip_blank_and_duplicates() {
        let draft = LickDraft {
            new_tonalities: vec![
                TonalityDraft { name: "Dorian".to_string() },
                TonalityDraft { name: " ".to_string() },
                TonalityDraft { name: "Dorian".to_string() },
                TonalityDraft { name: "Lydian".to_string() },
            ],
            ..LickDraft::named("Run")
        };
        let lick = draft.validate().unwrap();
        assert_eq!(lick.tonality_names, vec!["Dorian", "Lydian"]);
    }

    #[test]
    fn test_all_blank_tonalities_attach_nothing() {
        let draft = LickDraft {
            new_tonalities: vec![TonalityDraft::default(), TonalityDraft::default()],
            ..LickDraft::named("Run")
        };
        assert!(draft.validate().unwrap().tonality_names.is_empty());
    }

    #[test]
    fn test_backing_track_needs_name_and_link() {
        let half = LickDraft {
            new_backing_track: Some(BackingTrackDraft {
                name: "Slow blues in A".to_string(),
                link: "".to_string(),
            }),
            ..LickDraft::named("Turnaround")
        };
        assert_eq!(half.validate().unwrap().backing_track, None);

        let full = LickDraft {
            new_backing_track: Some(BackingTrackDraft {
                name: "Slow blues in A".to_string(),
                link: "https://example.com/a".to_string(),
            }),
            ..LickDraft::named("Turnaround")
        };
        assert_eq!(
            full.validate().unwrap().backing_track,
            Some(("Slow blues in A".to_string(), "https://example.com/a".to_string()))
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"name": "Bend", "favourite": true}"#;
        assert!(serde_json::from_str::<LickDraft>(json).is_err());
    }
}
