//! Practice notes

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::models::Note;
use crate::Result;

/// Every note of one user, oldest first
pub async fn fetch_notes(pool: &SqlitePool, user_id: i64) -> Result<Vec<Note>> {
    sqlx::query("SELECT id, user_id, lick_id, body, created_at FROM notes WHERE user_id = ? ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await?
        .iter()
        .map(note_from_row)
        .collect()
}

/// Notes attached to one lick
pub async fn fetch_lick_notes(pool: &SqlitePool, user_id: i64, lick_id: i64) -> Result<Vec<Note>> {
    sqlx::query(
        "SELECT id, user_id, lick_id, body, created_at FROM notes WHERE user_id = ? AND lick_id = ? ORDER BY id",
    )
    .bind(user_id)
    .bind(lick_id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(note_from_row)
    .collect()
}

pub async fn insert_note(
    pool: &SqlitePool,
    user_id: i64,
    lick_id: Option<i64>,
    body: &str,
) -> Result<Note> {
    let created_at = Utc::now();
    let id = sqlx::query("INSERT INTO notes (user_id, lick_id, body, created_at) VALUES (?, ?, ?, ?)")
        .bind(user_id)
        .bind(lick_id)
        .bind(body)
        .bind(created_at)
        .execute(pool)
        .await?
        .last_insert_rowid();

    Ok(Note {
        id,
        user_id,
        lick_id,
        body: body.to_string(),
        created_at,
    })
}

fn note_from_row(row: &SqliteRow) -> Result<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        lick_id: row.try_get("lick_id")?,
        body: row.try_get("body")?,
        created_at: row.try_get("created_at")?,
    })
}
