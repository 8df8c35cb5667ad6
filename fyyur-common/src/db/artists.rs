//! Artist database operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::info;

use super::models::{Artist, ArtistDetails};
use super::rollback;
use crate::{Error, Genres, Result};

const SELECT_ARTIST: &str = r#"
    SELECT id, name, city, state, phone, website, facebook_link,
           image_link, genres, seeking_venue, seeking_description
    FROM artists
"#;

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    let genres: Option<String> = row.try_get("genres")?;
    Ok(Artist {
        id: row.try_get("id")?,
        details: ArtistDetails {
            name: row.try_get("name")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            phone: row.try_get("phone")?,
            website: row.try_get("website")?,
            facebook_link: row.try_get("facebook_link")?,
            image_link: row.try_get("image_link")?,
            genres: Genres::from_stored(genres.as_deref()),
            seeking_venue: row.try_get("seeking_venue")?,
            seeking_description: row.try_get("seeking_description")?,
        },
    })
}

/// All artists in insertion order
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!("{SELECT_ARTIST} ORDER BY id ASC"))
        .fetch_all(pool)
        .await?;
    rows.iter().map(artist_from_row).collect()
}

/// Most recently listed artists, newest first
pub async fn recent_artists(pool: &SqlitePool, limit: i64) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!("{SELECT_ARTIST} ORDER BY id DESC LIMIT ?"))
        .bind(limit)
        .fetch_all(pool)
        .await?;
    rows.iter().map(artist_from_row).collect()
}

pub async fn get_artist(pool: &SqlitePool, id: i64) -> Result<Option<Artist>> {
    let row = sqlx::query(&format!("{SELECT_ARTIST} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(artist_from_row).transpose()
}

pub async fn count_artists(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(pool)
        .await?)
}

/// Insert a artist in its own transaction, returning the new id
pub async fn insert_artist(pool: &SqlitePool, details: &ArtistDetails) -> Result<i64> {
    let mut tx = pool.begin().await?;
    match insert_artist_row(&mut tx, details).await {
        Ok(id) => {
            tx.commit().await?;
            info!("Artist {} '{}' listed", id, details.name);
            Ok(id)
        }
        Err(e) => {
            rollback(tx).await;
            Err(e)
        }
    }
}

/// Replace every field of an existing artist
///
/// Returns `Error::NotFound` (and writes nothing) if the id is unknown.
pub async fn update_artist(pool: &SqlitePool, id: i64, details: &ArtistDetails) -> Result<()> {
    let mut tx = pool.begin().await?;
    match update_artist_row(&mut tx, id, details).await {
        Ok(()) => {
            tx.commit().await?;
            info!("Artist {} updated", id);
            Ok(())
        }
        Err(e) => {
            rollback(tx).await;
            Err(e)
        }
    }
}

pub(crate) async fn insert_artist_row(conn: &mut SqliteConnection, details: &ArtistDetails) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, website, facebook_link,
            image_link, genres, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&details.name)
    .bind(&details.city)
    .bind(&details.state)
    .bind(&details.phone)
    .bind(&details.website)
    .bind(&details.facebook_link)
    .bind(&details.image_link)
    .bind(details.genres.to_stored())
    .bind(details.seeking_venue)
    .bind(&details.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn update_artist_row(conn: &mut SqliteConnection, id: i64, details: &ArtistDetails) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, website = ?,
            facebook_link = ?, image_link = ?, genres = ?, seeking_venue = ?,
            seeking_description = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&details.name)
    .bind(&details.city)
    .bind(&details.state)
    .bind(&details.phone)
    .bind(&details.website)
    .bind(&details.facebook_link)
    .bind(&details.image_link)
    .bind(details.genres.to_stored())
    .bind(details.seeking_venue)
    .bind(&details.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }
    Ok(())
}
