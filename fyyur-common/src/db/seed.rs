//! Sample data for a fresh database
//!
//! Three venues, three artists and five shows (two in the past, three far in
//! the future), loaded only when every table is empty.

use chrono::{DateTime, TimeZone, Utc};
use sqlx::SqlitePool;
use tracing::info;

use super::artists::insert_artist_row;
use super::models::{ArtistDetails, NewShow, VenueDetails};
use super::shows::insert_show_row;
use super::venues::insert_venue_row;
use super::{artists, rollback, shows, venues};
use crate::{Genres, Result};

/// What [`seed_sample_data`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded { venues: usize, artists: usize, shows: usize },
    AlreadyPopulated,
}

/// Insert the sample dataset into an empty database, all or nothing
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<SeedOutcome> {
    let existing = venues::count_venues(pool).await?
        + artists::count_artists(pool).await?
        + shows::count_shows(pool).await?;
    if existing > 0 {
        info!("Database already has data; skipping sample seed");
        return Ok(SeedOutcome::AlreadyPopulated);
    }

    let sample_venues = sample_venues()?;
    let sample_artists = sample_artists()?;

    let mut tx = pool.begin().await?;
    let seeded: Result<SeedOutcome> = async {
        let mut venue_ids = Vec::with_capacity(sample_venues.len());
        for venue in &sample_venues {
            venue_ids.push(insert_venue_row(&mut tx, venue).await?);
        }

        let mut artist_ids = Vec::with_capacity(sample_artists.len());
        for artist in &sample_artists {
            artist_ids.push(insert_artist_row(&mut tx, artist).await?);
        }

        // (artist index, venue index, start)
        let bookings: [(usize, usize, DateTime<Utc>); 5] = [
            (0, 0, utc(2019, 5, 21, 21, 30)),
            (1, 2, utc(2019, 6, 15, 23, 0)),
            (2, 2, utc(2035, 4, 1, 20, 0)),
            (2, 2, utc(2035, 4, 8, 20, 0)),
            (2, 2, utc(2035, 4, 15, 20, 0)),
        ];
        for (artist, venue, start_time) in bookings {
            let show = NewShow {
                artist_id: artist_ids[artist],
                venue_id: venue_ids[venue],
                start_time,
            };
            insert_show_row(&mut tx, &show).await?;
        }

        Ok(SeedOutcome::Seeded {
            venues: venue_ids.len(),
            artists: artist_ids.len(),
            shows: bookings.len(),
        })
    }
    .await;

    match seeded {
        Ok(outcome) => {
            tx.commit().await?;
            info!("Seeded sample data: {:?}", outcome);
            Ok(outcome)
        }
        Err(e) => {
            rollback(tx).await;
            Err(e)
        }
    }
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn sample_venues() -> Result<Vec<VenueDetails>> {
    Ok(vec![
        VenueDetails {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            website: Some("https://www.themusicalhop.com".to_string()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1543900694-133f37abaaa5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=400&q=60".to_string()),
            genres: Genres::from_tags(["Jazz", "Reggae", "Swing", "Classical", "Folk"])?,
            seeking_talent: true,
            seeking_description: "We are on the lookout for a local artist to play every two weeks. Please call us.".to_string(),
        },
        VenueDetails {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            phone: Some("914-003-1132".to_string()),
            website: Some("https://www.theduelingpianos.com".to_string()),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=750&q=80".to_string()),
            genres: Genres::from_tags(["Classical", "R&B", "Hip-Hop"])?,
            seeking_talent: false,
            seeking_description: String::new(),
        },
        VenueDetails {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "34 Whiskey Moore Ave".to_string(),
            phone: Some("415-000-1234".to_string()),
            website: Some("https://www.parksquarelivemusicandcoffee.com".to_string()),
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=747&q=80".to_string()),
            genres: Genres::from_tags(["Rock n Roll", "Jazz", "Classical", "Folk"])?,
            seeking_talent: false,
            seeking_description: String::new(),
        },
    ])
}

fn sample_artists() -> Result<Vec<ArtistDetails>> {
    Ok(vec![
        ArtistDetails {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("326-123-5000".to_string()),
            website: Some("https://www.gunsnpetalsband.com".to_string()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1549213783-8284d0336c4f?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=300&q=80".to_string()),
            genres: Genres::from_tags(["Rock n Roll"])?,
            seeking_venue: true,
            seeking_description: "Looking for shows to perform at in the San Francisco Bay Area!".to_string(),
        },
        ArtistDetails {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            phone: Some("300-400-5000".to_string()),
            website: None,
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=334&q=80".to_string()),
            genres: Genres::from_tags(["Jazz"])?,
            seeking_venue: false,
            seeking_description: String::new(),
        },
        ArtistDetails {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("432-325-5432".to_string()),
            website: None,
            facebook_link: None,
            image_link: Some("https://images.unsplash.com/photo-1558369981-f9ca78462e61?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=794&q=80".to_string()),
            genres: Genres::from_tags(["Jazz", "Classical"])?,
            seeking_venue: false,
            seeking_description: String::new(),
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_database;

    #[tokio::test]
    async fn test_seed_populates_empty_database_once() {
        let pool = init_memory_database().await.unwrap();

        let first = seed_sample_data(&pool).await.unwrap();
        assert_eq!(
            first,
            SeedOutcome::Seeded {
                venues: 3,
                artists: 3,
                shows: 5
            }
        );

        let second = seed_sample_data(&pool).await.unwrap();
        assert_eq!(second, SeedOutcome::AlreadyPopulated);
        assert_eq!(shows::count_shows(&pool).await.unwrap(), 5);
    }
}
