//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tonality {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackingTrack {
    pub id: i64,
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub user_id: i64,
    pub lick_id: Option<i64>,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A named musical phrase owned by one user
///
/// Related collections are unordered; they are loaded in id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lick {
    pub id: i64,
    pub user_id: i64,
    pub artist: Option<Artist>,
    pub name: String,
    pub bpm: Option<i64>,
    pub current_key: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub performance_rating: Option<i64>,
    pub last_practiced: Option<DateTime<Utc>>,
    pub scheduled_practice: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tonalities: Vec<Tonality>,
    #[serde(default)]
    pub backing_tracks: Vec<BackingTrack>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Lick {
    /// Names of the attached tonalities
    pub fn tonality_names(&self) -> impl Iterator<Item = &str> {
        self.tonalities.iter().map(|t| t.name.as_str())
    }

    pub fn has_tonality(&self, name: &str) -> bool {
        self.tonality_names().any(|t| t == name)
    }

    pub fn artist_name(&self) -> Option<&str> {
        self.artist.as_ref().map(|a| a.name.as_str())
    }

    /// True when none of the practice details has been filled in
    pub fn lacks_details(&self) -> bool {
        self.bpm.is_none()
            && self.current_key.is_none()
            && self.description.is_none()
            && self.last_practiced.is_none()
            && self.performance_rating.is_none()
            && self.scheduled_practice.is_none()
    }
}
