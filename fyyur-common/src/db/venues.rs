//! Venue database operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::info;

use super::models::{Venue, VenueDetails};
use super::rollback;
use crate::{Error, Genres, Result};

const SELECT_VENUE: &str = r#"
    SELECT id, name, city, state, address, phone, website, facebook_link,
           image_link, genres, seeking_talent, seeking_description
    FROM venues
"#;

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    let genres: Option<String> = row.try_get("genres")?;
    Ok(Venue {
        id: row.try_get("id")?,
        details: VenueDetails {
            name: row.try_get("name")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            address: row.try_get("address")?,
            phone: row.try_get("phone")?,
            website: row.try_get("website")?,
            facebook_link: row.try_get("facebook_link")?,
            image_link: row.try_get("image_link")?,
            genres: Genres::from_stored(genres.as_deref()),
            seeking_talent: row.try_get("seeking_talent")?,
            seeking_description: row.try_get("seeking_description")?,
        },
    })
}

/// All venues in insertion order
pub async fn list_venues(pool: &SqlitePool) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!("{SELECT_VENUE} ORDER BY id ASC"))
        .fetch_all(pool)
        .await?;
    rows.iter().map(venue_from_row).collect()
}

/// Most recently listed venues, newest first
pub async fn recent_venues(pool: &SqlitePool, limit: i64) -> Result<Vec<Venue>> {
    let rows = sqlx::query(&format!("{SELECT_VENUE} ORDER BY id DESC LIMIT ?"))
        .bind(limit)
        .fetch_all(pool)
        .await?;
    rows.iter().map(venue_from_row).collect()
}

pub async fn get_venue(pool: &SqlitePool, id: i64) -> Result<Option<Venue>> {
    let row = sqlx::query(&format!("{SELECT_VENUE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(venue_from_row).transpose()
}

pub async fn count_venues(pool: &SqlitePool) -> Result<i64> {
    Ok(sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(pool)
        .await?)
}

/// Insert a venue in its own transaction, returning the new id
pub async fn insert_venue(pool: &SqlitePool, details: &VenueDetails) -> Result<i64> {
    let mut tx = pool.begin().await?;
    match insert_venue_row(&mut tx, details).await {
        Ok(id) => {
            tx.commit().await?;
            info!("Venue {} '{}' listed", id, details.name);
            Ok(id)
        }
        Err(e) => {
            rollback(tx).await;
            Err(e)
        }
    }
}

/// Replace every field of an existing venue
///
/// Returns `Error::NotFound` (and writes nothing) if the id is unknown.
pub async fn update_venue(pool: &SqlitePool, id: i64, details: &VenueDetails) -> Result<()> {
    let mut tx = pool.begin().await?;
    match update_venue_row(&mut tx, id, details).await {
        Ok(()) => {
            tx.commit().await?;
            info!("Venue {} updated", id);
            Ok(())
        }
        Err(e) => {
            rollback(tx).await;
            Err(e)
        }
    }
}

pub(crate) async fn insert_venue_row(conn: &mut SqliteConnection, details: &VenueDetails) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, website, facebook_link,
            image_link, genres, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&details.name)
    .bind(&details.city)
    .bind(&details.state)
    .bind(&details.address)
    .bind(&details.phone)
    .bind(&details.website)
    .bind(&details.facebook_link)
    .bind(&details.image_link)
    .bind(details.genres.to_stored())
    .bind(details.seeking_talent)
    .bind(&details.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn update_venue_row(conn: &mut SqliteConnection, id: i64, details: &VenueDetails) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?, website = ?,
            facebook_link = ?, image_link = ?, genres = ?, seeking_talent = ?,
            seeking_description = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&details.name)
    .bind(&details.city)
    .bind(&details.state)
    .bind(&details.address)
    .bind(&details.phone)
    .bind(&details.website)
    .bind(&details.facebook_link)
    .bind(&details.image_link)
    .bind(details.genres.to_stored())
    .bind(details.seeking_talent)
    .bind(&details.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }
    Ok(())
}
