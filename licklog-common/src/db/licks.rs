//! Lick persistence
//!
//! Owner-scoped queries: every lookup filters on `user_id`, so a lick id
//! belonging to another user behaves exactly like a missing one.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::collections::HashSet;
use tracing::{debug, info};

use super::models::{Artist, BackingTrack, Genre, Lick, Tonality, User};
use super::notes::fetch_lick_notes;
use crate::api::types::DeleteOutcome;
use crate::draft::NewLick;
use crate::Result;

const LICK_COLUMNS: &str = r#"
    SELECT l.id, l.user_id, l.name, l.bpm, l.current_key, l.description, l.link,
           l.performance_rating, l.last_practiced, l.scheduled_practice,
           a.id AS artist_id, a.name AS artist_name
    FROM licks l
    LEFT JOIN artists a ON a.id = l.artist_id
"#;

/// Create a user (authentication lives outside this crate)
pub async fn create_user(pool: &SqlitePool, name: &str) -> Result<User> {
    let id = sqlx::query("INSERT INTO users (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?
        .last_insert_rowid();

    Ok(User {
        id,
        name: name.to_string(),
    })
}

pub async fn user_exists(pool: &SqlitePool, user_id: i64) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// All licks of one user in insertion order, with artist, tonalities,
/// backing tracks and genres (notes are only loaded by [`fetch_lick`])
pub async fn fetch_licks(pool: &SqlitePool, user_id: i64) -> Result<Vec<Lick>> {
    let rows = sqlx::query(&format!("{LICK_COLUMNS} WHERE l.user_id = ? ORDER BY l.id"))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    let mut licks = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut lick = lick_from_row(row)?;
        load_relations(pool, &mut lick).await?;
        licks.push(lick);
    }

    debug!(user_id, count = licks.len(), "Fetched licks");
    Ok(licks)
}

/// One lick with every nested collection, or `None` if the user has no such lick
pub async fn fetch_lick(pool: &SqlitePool, user_id: i64, lick_id: i64) -> Result<Option<Lick>> {
    let row = sqlx::query(&format!("{LICK_COLUMNS} WHERE l.id = ? AND l.user_id = ?"))
        .bind(lick_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => {
            let mut lick = lick_from_row(&row)?;
            load_relations(pool, &mut lick).await?;
            lick.notes = fetch_lick_notes(pool, user_id, lick_id).await?;
            Ok(Some(lick))
        }
        None => Ok(None),
    }
}

/// Delete a lick; deleting a missing lick reports `NotFound` and changes nothing
pub async fn delete_lick(pool: &SqlitePool, user_id: i64, lick_id: i64) -> Result<DeleteOutcome> {
    let result = sqlx::query("DELETE FROM licks WHERE id = ? AND user_id = ?")
        .bind(lick_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        debug!(user_id, lick_id, "Delete of missing lick");
        Ok(DeleteOutcome::NotFound)
    } else {
        info!(user_id, lick_id, "Deleted lick");
        Ok(DeleteOutcome::Deleted)
    }
}

/// Names of every artist known to the catalog
pub async fn artist_names(pool: &SqlitePool) -> Result<HashSet<String>> {
    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM artists")
        .fetch_all(pool)
        .await?;
    Ok(names.into_iter().collect())
}

/// Insert a validated lick and attach its related entities
pub async fn insert_lick(pool: &SqlitePool, user_id: i64, new_lick: &NewLick) -> Result<Lick> {
    let mut tx = pool.begin().await?;

    let artist_id = match &new_lick.artist_name {
        Some(name) => Some(find_or_create_artist(&mut tx, name).await?.id),
        None => None,
    };

    let lick_id = sqlx::query(
        r#"
        INSERT INTO licks (
            user_id, artist_id, name, bpm, current_key, description, link,
            performance_rating, last_practiced, scheduled_practice
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(artist_id)
    .bind(&new_lick.name)
    .bind(new_lick.bpm)
    .bind(&new_lick.current_key)
    .bind(&new_lick.description)
    .bind(&new_lick.link)
    .bind(new_lick.performance_rating)
    .bind(new_lick.last_practiced)
    .bind(new_lick.scheduled_practice)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    attach_related(&mut tx, lick_id, new_lick).await?;
    tx.commit().await?;

    info!(user_id, lick_id, name = %new_lick.name, "Created lick");
    load_saved(pool, user_id, lick_id).await
}

/// Overwrite a lick's attributes and attach any new related entities
///
/// Returns `None` when the user has no lick with this id.
pub async fn update_lick(
    pool: &SqlitePool,
    user_id: i64,
    lick_id: i64,
    new_lick: &NewLick,
) -> Result<Option<Lick>> {
    let mut tx = pool.begin().await?;

    let artist_id = match &new_lick.artist_name {
        Some(name) => Some(find_or_create_artist(&mut tx, name).await?.id),
        None => None,
    };

    let result = sqlx::query(
        r#"
        UPDATE licks SET
            artist_id = ?, name = ?, bpm = ?, current_key = ?, description = ?, link = ?,
            performance_rating = ?, last_practiced = ?, scheduled_practice = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(artist_id)
    .bind(&new_lick.name)
    .bind(new_lick.bpm)
    .bind(&new_lick.current_key)
    .bind(&new_lick.description)
    .bind(&new_lick.link)
    .bind(new_lick.performance_rating)
    .bind(new_lick.last_practiced)
    .bind(new_lick.scheduled_practice)
    .bind(lick_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        tx.rollback().await?;
        return Ok(None);
    }

    attach_related(&mut tx, lick_id, new_lick).await?;
    tx.commit().await?;

    info!(user_id, lick_id, "Updated lick");
    load_saved(pool, user_id, lick_id).await.map(Some)
}

/// Attach genres by name (find-or-create)
pub async fn attach_genres(pool: &SqlitePool, lick_id: i64, names: &[&str]) -> Result<()> {
    let mut conn = pool.acquire().await?;
    for name in names {
        let genre_id = find_or_create_named(&mut conn, "genres", name).await?;
        sqlx::query("INSERT OR IGNORE INTO genre_licks (lick_id, genre_id) VALUES (?, ?)")
            .bind(lick_id)
            .bind(genre_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

pub async fn find_or_create_artist(conn: &mut SqliteConnection, name: &str) -> Result<Artist> {
    let id = find_or_create_named(conn, "artists", name).await?;
    Ok(Artist {
        id,
        name: name.to_string(),
    })
}

pub async fn find_or_create_tonality(conn: &mut SqliteConnection, name: &str) -> Result<Tonality> {
    let id = find_or_create_named(conn, "tonalities", name).await?;
    Ok(Tonality {
        id,
        name: name.to_string(),
    })
}

/// Backing tracks are identified by the (name, link) pair
pub async fn find_or_create_backing_track(
    conn: &mut SqliteConnection,
    name: &str,
    link: &str,
) -> Result<BackingTrack> {
    sqlx::query("INSERT OR IGNORE INTO backing_tracks (name, link) VALUES (?, ?)")
        .bind(name)
        .bind(link)
        .execute(&mut *conn)
        .await?;

    let id: i64 = sqlx::query_scalar("SELECT id FROM backing_tracks WHERE name = ? AND link = ?")
        .bind(name)
        .bind(link)
        .fetch_one(&mut *conn)
        .await?;

    Ok(BackingTrack {
        id,
        name: name.to_string(),
        link: link.to_string(),
    })
}

/// `table` is always one of the fixed name-keyed tables above
async fn find_or_create_named(conn: &mut SqliteConnection, table: &str, name: &str) -> Result<i64> {
    sqlx::query(&format!("INSERT OR IGNORE INTO {table} (name) VALUES (?)"))
        .bind(name)
        .execute(&mut *conn)
        .await?;

    let id: i64 = sqlx::query_scalar(&format!("SELECT id FROM {table} WHERE name = ?"))
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok(id)
}

async fn attach_related(conn: &mut SqliteConnection, lick_id: i64, new_lick: &NewLick) -> Result<()> {
    for name in &new_lick.tonality_names {
        let tonality = find_or_create_tonality(conn, name).await?;
        sqlx::query("INSERT OR IGNORE INTO lick_tonalities (lick_id, tonality_id) VALUES (?, ?)")
            .bind(lick_id)
            .bind(tonality.id)
            .execute(&mut *conn)
            .await?;
    }

    if let Some((name, link)) = &new_lick.backing_track {
        let track = find_or_create_backing_track(conn, name, link).await?;
        sqlx::query(
            "INSERT OR IGNORE INTO backing_track_licks (lick_id, backing_track_id) VALUES (?, ?)",
        )
        .bind(lick_id)
        .bind(track.id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

async fn load_saved(pool: &SqlitePool, user_id: i64, lick_id: i64) -> Result<Lick> {
    fetch_lick(pool, user_id, lick_id)
        .await?
        .ok_or_else(|| crate::Error::Internal(format!("Lick {lick_id} vanished after save")))
}

fn lick_from_row(row: &SqliteRow) -> Result<Lick> {
    let artist_id: Option<i64> = row.try_get("artist_id")?;
    let artist_name: Option<String> = row.try_get("artist_name")?;
    let artist = match (artist_id, artist_name) {
        (Some(id), Some(name)) => Some(Artist { id, name }),
        _ => None,
    };

    Ok(Lick {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        artist,
        name: row.try_get("name")?,
        bpm: row.try_get("bpm")?,
        current_key: row.try_get("current_key")?,
        description: row.try_get("description")?,
        link: row.try_get("link")?,
        performance_rating: row.try_get("performance_rating")?,
        last_practiced: row.try_get("last_practiced")?,
        scheduled_practice: row.try_get("scheduled_practice")?,
        tonalities: Vec::new(),
        backing_tracks: Vec::new(),
        genres: Vec::new(),
        notes: Vec::new(),
    })
}

async fn load_relations(pool: &SqlitePool, lick: &mut Lick) -> Result<()> {
    lick.tonalities = sqlx::query(
        r#"
        SELECT t.id, t.name FROM tonalities t
        JOIN lick_tonalities lt ON lt.tonality_id = t.id
        WHERE lt.lick_id = ?
        ORDER BY t.id
        "#,
    )
    .bind(lick.id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| -> Result<Tonality> {
        Ok(Tonality {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    })
    .collect::<Result<_>>()?;

    lick.backing_tracks = sqlx::query(
        r#"
        SELECT b.id, b.name, b.link FROM backing_tracks b
        JOIN backing_track_licks bl ON bl.backing_track_id = b.id
        WHERE bl.lick_id = ?
        ORDER BY b.id
        "#,
    )
    .bind(lick.id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| -> Result<BackingTrack> {
        Ok(BackingTrack {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            link: row.try_get("link")?,
        })
    })
    .collect::<Result<_>>()?;

    lick.genres = sqlx::query(
        r#"
        SELECT g.id, g.name FROM genres g
        JOIN genre_licks gl ON gl.genre_id = g.id
        WHERE gl.lick_id = ?
        ORDER BY g.id
        "#,
    )
    .bind(lick.id)
    .fetch_all(pool)
    .await?
    .iter()
    .map(|row| -> Result<Genre> {
        Ok(Genre {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    })
    .collect::<Result<_>>()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init::init_memory_database;
    use crate::draft::{BackingTrackDraft, LickDraft, TonalityDraft};

    async fn setup() -> (SqlitePool, User) {
        let pool = init_memory_database().await.expect("in-memory database");
        let user = create_user(&pool, "Django").await.expect("user");
        (pool, user)
    }

    fn draft_with_relations() -> NewLick {
        LickDraft {
            artist_name: Some("Charlie Parker".to_string()),
            new_tonalities: vec![
                TonalityDraft { name: "Dorian".to_string() },
                TonalityDraft { name: "Bebop Major".to_string() },
            ],
            new_backing_track: Some(BackingTrackDraft {
                name: "Blues in F".to_string(),
                link: "https://example.com/f-blues".to_string(),
            }),
            ..LickDraft::named("Bird lick")
        }
        .validate()
        .expect("valid draft")
    }

    #[tokio::test]
    async fn test_insert_and_fetch_lick_with_relations() {
        let (pool, user) = setup().await;

        let saved = insert_lick(&pool, user.id, &draft_with_relations()).await.unwrap();
        let loaded = fetch_lick(&pool, user.id, saved.id).await.unwrap().unwrap();

        assert_eq!(loaded.name, "Bird lick");
        assert_eq!(loaded.artist_name(), Some("Charlie Parker"));
        assert_eq!(
            loaded.tonality_names().collect::<Vec<_>>(),
            vec!["Dorian", "Bebop Major"]
        );
        assert_eq!(loaded.backing_tracks.len(), 1);
        assert_eq!(loaded.backing_tracks[0].link, "https://example.com/f-blues");
    }

    #[tokio::test]
    async fn test_related_entities_are_shared() {
        let (pool, user) = setup().await;

        let first = insert_lick(&pool, user.id, &draft_with_relations()).await.unwrap();
        let second = insert_lick(&pool, user.id, &draft_with_relations()).await.unwrap();

        assert_eq!(first.tonalities, second.tonalities);
        assert_eq!(first.backing_tracks, second.backing_tracks);
        assert_eq!(artist_names(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_is_owner_scoped() {
        let (pool, user) = setup().await;
        let other = create_user(&pool, "Wes").await.unwrap();

        let lick = insert_lick(&pool, user.id, &draft_with_relations()).await.unwrap();

        assert!(fetch_lick(&pool, other.id, lick.id).await.unwrap().is_none());
        assert!(fetch_licks(&pool, other.id).await.unwrap().is_empty());
        assert_eq!(
            delete_lick(&pool, other.id, lick.id).await.unwrap(),
            DeleteOutcome::NotFound
        );
        assert_eq!(fetch_licks(&pool, user.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let (pool, user) = setup().await;
        let keep = insert_lick(&pool, user.id, &LickDraft::named("Keep").validate().unwrap())
            .await
            .unwrap();
        let doomed = insert_lick(&pool, user.id, &LickDraft::named("Doomed").validate().unwrap())
            .await
            .unwrap();

        assert_eq!(
            delete_lick(&pool, user.id, doomed.id).await.unwrap(),
            DeleteOutcome::Deleted
        );
        assert_eq!(
            delete_lick(&pool, user.id, doomed.id).await.unwrap(),
            DeleteOutcome::NotFound
        );

        let remaining = fetch_licks(&pool, user.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
    }

    #[tokio::test]
    async fn test_missing_artist_loads_as_none() {
        let (pool, user) = setup().await;
        let lick = insert_lick(&pool, user.id, &draft_with_relations()).await.unwrap();

        sqlx::query("DELETE FROM artists").execute(&pool).await.unwrap();

        let loaded = fetch_lick(&pool, user.id, lick.id).await.unwrap().unwrap();
        assert!(loaded.artist.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_attributes() {
        let (pool, user) = setup().await;
        let lick = insert_lick(&pool, user.id, &draft_with_relations()).await.unwrap();

        let changes = LickDraft {
            performance_rating: Some("4".to_string()),
            new_tonalities: vec![TonalityDraft { name: "Lydian".to_string() }],
            ..LickDraft::named("Bird lick (slow)")
        }
        .validate()
        .unwrap();

        let updated = update_lick(&pool, user.id, lick.id, &changes)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Bird lick (slow)");
        assert_eq!(updated.performance_rating, Some(4));
        assert!(updated.artist.is_none());
        assert_eq!(updated.tonalities.len(), 3);

        assert!(update_lick(&pool, user.id, 9999, &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_attach_genres() {
        let (pool, user) = setup().await;
        let lick = insert_lick(&pool, user.id, &LickDraft::named("Chicken picking").validate().unwrap())
            .await
            .unwrap();

        attach_genres(&pool, lick.id, &["Country", "Rockabilly", "Country"]).await.unwrap();

        let loaded = fetch_lick(&pool, user.id, lick.id).await.unwrap().unwrap();
        let genres: Vec<_> = loaded.genres.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(genres, vec!["Country", "Rockabilly"]);
    }
}
