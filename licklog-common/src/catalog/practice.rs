//! Practice dashboard selections

use chrono::{DateTime, NaiveDate, Utc};

use crate::api::types::PracticeDashboard;
use crate::db::models::Lick;
use crate::time::end_of_day;

/// Highest rating still counted as sloppy
pub const SLOPPY_RATING_MAX: i64 = 3;

/// Number of sloppiest licks shown
pub const SLOPPIEST_LIMIT: usize = 5;

/// Licks scheduled for the UTC calendar day `today`
pub fn licks_of_the_day(licks: &[Lick], today: NaiveDate) -> Vec<Lick> {
    licks
        .iter()
        .filter(|l| l.scheduled_practice.map(|d| d.date_naive()) == Some(today))
        .cloned()
        .collect()
}

/// Licks whose scheduled day ended before `now`
pub fn overdue_licks(licks: &[Lick], now: DateTime<Utc>) -> Vec<Lick> {
    licks
        .iter()
        .filter(|l| l.scheduled_practice.is_some_and(|d| now > end_of_day(&d)))
        .cloned()
        .collect()
}

/// Lowest-rated licks (rating at most [`SLOPPY_RATING_MAX`]), worst first
pub fn sloppiest_licks(licks: &[Lick]) -> Vec<Lick> {
    let mut sloppy: Vec<&Lick> = licks
        .iter()
        .filter(|l| l.performance_rating.is_some_and(|r| r <= SLOPPY_RATING_MAX))
        .collect();
    sloppy.sort_by_key(|l| l.performance_rating);
    sloppy.into_iter().take(SLOPPIEST_LIMIT).cloned().collect()
}

pub fn practice_dashboard(licks: &[Lick], now: DateTime<Utc>) -> PracticeDashboard {
    PracticeDashboard {
        licks_of_the_day: licks_of_the_day(licks, now.date_naive()),
        overdue: overdue_licks(licks, now),
        sloppiest: sloppiest_licks(licks),
    }
}
