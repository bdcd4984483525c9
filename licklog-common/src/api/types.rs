//! Shared API request/response types
//!
//! Types exchanged between licklog-api and licklog-ui.

use serde::{Deserialize, Serialize};

use crate::catalog::FilterOptions;
use crate::db::models::Lick;

/// Filter and sort selection for the lick index
///
/// Both fields are raw selector values; an empty string means "none".
///
/// # Examples
///
/// ```
/// // GET /users/1/licks?filter=Dorian&sort=Date+Last+Practiced
/// use licklog_common::api::types::LickQuery;
///
/// let query = LickQuery {
///     filter: "Dorian".to_string(),
///     sort: "Date Last Practiced".to_string(),
/// };
/// assert!(!query.is_unfiltered());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LickQuery {
    #[serde(default)]
    pub filter: String,
    #[serde(default)]
    pub sort: String,
}

impl LickQuery {
    pub fn new(filter: impl Into<String>, sort: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            sort: sort.into(),
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.filter.trim().is_empty()
    }
}

/// Result of a delete request
///
/// Deleting a lick that is already gone is a defined outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Everything needed to render the filter/sort selection form
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IndexOptions {
    pub filters: FilterOptions,
    /// Sort selector labels, "" (none) first
    pub sorts: Vec<String>,
}

/// Practice dashboard for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PracticeDashboard {
    pub licks_of_the_day: Vec<Lick>,
    pub overdue: Vec<Lick>,
    pub sloppiest: Vec<Lick>,
}

/// Error body returned by licklog-api
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Offending fields for validation failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}
