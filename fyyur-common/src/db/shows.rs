//! Show database operations
//!
//! Start times are stored as UTC epoch milliseconds (`start_time_ms`).

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::info;

use super::models::{NewShow, Show};
use super::rollback;
use crate::catalog::OwnerKind;
use crate::{time, Error, Result};

fn show_from_row(row: &SqliteRow) -> Result<Show> {
    let start_time_ms: i64 = row.try_get("start_time_ms")?;
    Ok(Show {
        id: row.try_get("id")?,
        artist_id: row.try_get("artist_id")?,
        venue_id: row.try_get("venue_id")?,
        start_time: time::from_millis(start_time_ms)?,
    })
}

/// All shows in insertion order
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<Show>> {
    let rows = sqlx::query(
        "SELECT id, artist_id, venue_id, start_time_ms FROM shows ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;
    rows.iter().map(show_from_row).collect()
}

/// Shows of one venue or artist in insertion order
pub async fn shows_for_owner(pool: &SqlitePool, kind: OwnerKind, owner_id: i64) -> Result<Vec<Show>> {
    let sql = match kind {
        OwnerKind::Venue => {
            "SELECT id, artist_id, venue_id, start_time_ms FROM shows WHERE venue_id = ? ORDER BY id ASC"
        }
        OwnerKind::Artist => {
            "SELECT id, artist_id, venue_id, start_time_ms FROM shows WHERE artist_id = ? ORDER BY id ASC"
        }
    };
    let rows = sqlx::query(sql).bind(owner_id).fetch_all(pool).await?;
    rows.iter().map(show_from_row).collect()
}

pub async fn count_shows(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(pool)
        .await?)
}

/// Insert a show in its own transaction, returning the new id
///
/// Unknown artist or venue ids are rejected as invalid input before the
/// insert is attempted.
pub async fn insert_show(pool: &SqlitePool, show: &NewShow) -> Result<i64> {
    let mut tx = pool.begin().await?;
    match insert_show_row(&mut tx, show).await {
        Ok(id) => {
            tx.commit().await?;
            info!(
                "Show {} listed (artist {}, venue {}, {})",
                id,
                show.artist_id,
                show.venue_id,
                show.start_time.to_rfc3339()
            );
            Ok(id)
        }
        Err(e) => {
            rollback(tx).await;
            Err(e)
        }
    }
}

pub(crate) async fn insert_show_row(conn: &mut SqliteConnection, show: &NewShow) -> Result<i64> {
    let artist_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
        .bind(show.artist_id)
        .fetch_one(&mut *conn)
        .await?;
    if !artist_exists {
        return Err(Error::InvalidInput(format!("artist {} does not exist", show.artist_id)));
    }

    let venue_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(show.venue_id)
        .fetch_one(&mut *conn)
        .await?;
    if !venue_exists {
        return Err(Error::InvalidInput(format!("venue {} does not exist", show.venue_id)));
    }

    let result = sqlx::query(
        "INSERT INTO shows (artist_id, venue_id, start_time_ms) VALUES (?, ?, ?)",
    )
    .bind(show.artist_id)
    .bind(show.venue_id)
    .bind(time::to_millis(show.start_time))
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}
