//! Read-side derivations over venues, artists and shows
//!
//! - [`classify`]: past/upcoming decision for one show
//! - [`partition`]: an owner's shows split into past and upcoming
//! - [`area`]: venues grouped by state and city
//! - [`search`]: case-insensitive name matching
//!
//! [`Catalog`] ties these to a [`CatalogStore`]. Every operation captures
//! "now" once and uses it for all shows it looks at; the `_at` variants take
//! the reference instant from the caller instead.

pub mod area;
pub mod classify;
pub mod partition;
pub mod search;
pub mod store;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

pub use area::{Area, AreaVenue};
pub use classify::{classify, ShowTiming};
pub use partition::{Counterpart, OwnerKind, PartitionedShows, ShowSummary};
pub use search::{SearchHit, SearchResults};
pub use store::{CatalogStore, MemoryStore};

use crate::db::models::Show;
use crate::{time, Error, Result};

/// One row of the show listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Catalog queries over an injected store
#[derive(Debug, Clone)]
pub struct Catalog<S> {
    store: S,
}

impl<S: CatalogStore> Catalog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Past and upcoming shows of one venue or artist
    pub async fn partition_shows(&self, kind: OwnerKind, owner_id: i64) -> Result<PartitionedShows> {
        self.partition_shows_at(kind, owner_id, time::now()).await
    }

    pub async fn partition_shows_at(
        &self,
        kind: OwnerKind,
        owner_id: i64,
        now: DateTime<Utc>,
    ) -> Result<PartitionedShows> {
        let shows = self.store.shows_for(kind, owner_id).await?;
        let counterparts = self.counterparts_for(kind, &shows).await?;
        let partitioned = partition::partition_shows(kind, owner_id, &shows, &counterparts, now)?;

        debug!(
            "{} {}: {} past, {} upcoming",
            kind.label(),
            owner_id,
            partitioned.past_count(),
            partitioned.upcoming_count()
        );
        Ok(partitioned)
    }

    /// All venues grouped by (state, city) with upcoming-show counts
    pub async fn venues_by_area(&self) -> Result<Vec<Area>> {
        self.venues_by_area_at(time::now()).await
    }

    pub async fn venues_by_area_at(&self, now: DateTime<Utc>) -> Result<Vec<Area>> {
        let venues = self.store.venues().await?;
        let counts = self
            .upcoming_counts_at(OwnerKind::Venue, venues.iter().map(|v| v.id).collect(), now)
            .await?;
        Ok(area::aggregate_by_area(&venues, &counts))
    }

    /// Venues or artists whose name contains `term`
    pub async fn search(&self, kind: OwnerKind, term: &str) -> Result<SearchResults> {
        self.search_at(kind, term, time::now()).await
    }

    pub async fn search_at(
        &self,
        kind: OwnerKind,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<SearchResults> {
        let candidates: Vec<(i64, String)> = match kind {
            OwnerKind::Venue => self
                .store
                .venues()
                .await?
                .into_iter()
                .map(|v| (v.id, v.details.name))
                .collect(),
            OwnerKind::Artist => self
                .store
                .artists()
                .await?
                .into_iter()
                .map(|a| (a.id, a.details.name))
                .collect(),
        };

        let matched: Vec<i64> = candidates
            .iter()
            .filter(|(_, name)| search::matches(term, name))
            .map(|(id, _)| *id)
            .collect();
        let counts = self.upcoming_counts_at(kind, matched, now).await?;

        let results = search::search(
            term,
            candidates.iter().map(|(id, name)| (*id, name.as_str())),
            &counts,
        );
        debug!("{} search '{}': {} match(es)", kind.label(), term, results.count);
        Ok(results)
    }

    /// Every show with its venue and artist display fields
    pub async fn show_listings(&self) -> Result<Vec<ShowListing>> {
        let shows = self.store.shows().await?;
        let venues = self.counterparts_for(OwnerKind::Artist, &shows).await?;
        let artists = self.counterparts_for(OwnerKind::Venue, &shows).await?;

        shows
            .iter()
            .map(|show| {
                let venue = venues.get(&show.venue_id).ok_or_else(|| {
                    Error::Integrity(format!(
                        "show {} references missing venue {}",
                        show.id, show.venue_id
                    ))
                })?;
                let artist = artists.get(&show.artist_id).ok_or_else(|| {
                    Error::Integrity(format!(
                        "show {} references missing artist {}",
                        show.id, show.artist_id
                    ))
                })?;

                Ok(ShowListing {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect()
    }

    async fn upcoming_counts_at(
        &self,
        kind: OwnerKind,
        owner_ids: Vec<i64>,
        now: DateTime<Utc>,
    ) -> Result<HashMap<i64, usize>> {
        if owner_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let shows = self.store.shows().await?;
        let counterparts = self.counterparts_for(kind, &shows).await?;
        partition::upcoming_counts(kind, owner_ids, &shows, &counterparts, now)
    }

    /// Counterparts of `kind`-owned shows, keyed by counterpart id
    async fn counterparts_for(
        &self,
        kind: OwnerKind,
        shows: &[Show],
    ) -> Result<HashMap<i64, Counterpart>> {
        let mut ids: Vec<i64> = shows.iter().map(|s| kind.counterpart_id_of(s)).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        self.store.counterparts(kind.counterpart(), &ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{Artist, ArtistDetails, Venue, VenueDetails};
    use crate::Genres;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
    }

    fn venue(id: i64, name: &str, state: &str, city: &str) -> Venue {
        Venue {
            id,
            details: VenueDetails {
                name: name.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                address: "1015 Folsom Street".to_string(),
                image_link: Some(format!("https://img.example/venue{}.jpg", id)),
                genres: Genres::from_tags(["Jazz"]).unwrap(),
                ..Default::default()
            },
        }
    }

    fn artist(id: i64, name: &str) -> Artist {
        Artist {
            id,
            details: ArtistDetails {
                name: name.to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                image_link: Some(format!("https://img.example/artist{}.jpg", id)),
                ..Default::default()
            },
        }
    }

    fn show(id: i64, artist_id: i64, venue_id: i64, offset: Duration) -> Show {
        Show {
            id,
            artist_id,
            venue_id,
            start_time: now() + offset,
        }
    }

    fn catalog() -> Catalog<MemoryStore> {
        Catalog::new(MemoryStore::new(
            vec![
                venue(1, "The Musical Hop", "CA", "San Francisco"),
                venue(2, "The Dueling Pianos Bar", "NY", "New York"),
                venue(3, "Park Square Live Music & Coffee", "CA", "San Francisco"),
            ],
            vec![artist(4, "Guns N Petals"), artist(5, "Matt Quevedo"), artist(6, "The Wild Sax Band")],
            vec![
                show(1, 4, 1, -Duration::days(30)),
                show(2, 5, 3, -Duration::days(10)),
                show(3, 6, 3, Duration::days(10)),
                show(4, 6, 3, Duration::days(17)),
                show(5, 4, 3, Duration::days(5)),
            ],
        ))
    }

    #[tokio::test]
    async fn test_artist_partition_resolves_venue_counterparts() {
        let result = catalog()
            .partition_shows_at(OwnerKind::Artist, 4, now())
            .await
            .unwrap();

        assert_eq!(result.past_count(), 1);
        assert_eq!(result.upcoming_count(), 1);
        assert_eq!(result.past[0].counterpart_name, "The Musical Hop");
        assert_eq!(result.upcoming[0].counterpart_id, 3);
        assert_eq!(
            result.upcoming[0].counterpart_image_link.as_deref(),
            Some("https://img.example/venue3.jpg")
        );
    }

    #[tokio::test]
    async fn test_venue_partition_resolves_artist_counterparts() {
        let result = catalog()
            .partition_shows_at(OwnerKind::Venue, 3, now())
            .await
            .unwrap();

        assert_eq!(result.past_count(), 1);
        assert_eq!(result.past[0].counterpart_name, "Matt Quevedo");
        let upcoming: Vec<&str> = result
            .upcoming
            .iter()
            .map(|s| s.counterpart_name.as_str())
            .collect();
        assert_eq!(upcoming, vec!["The Wild Sax Band", "The Wild Sax Band", "Guns N Petals"]);
    }

    #[tokio::test]
    async fn test_owner_without_shows_has_empty_partition() {
        let result = catalog()
            .partition_shows_at(OwnerKind::Venue, 2, now())
            .await
            .unwrap();
        assert_eq!(result.total(), 0);
    }

    #[tokio::test]
    async fn test_venues_by_area_counts_upcoming_shows() {
        let areas = catalog().venues_by_area_at(now()).await.unwrap();

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 0);
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 3);
        assert_eq!(areas[1].state, "NY");
    }

    #[tokio::test]
    async fn test_search_venues_and_artists() {
        let catalog = catalog();

        let venues = catalog.search_at(OwnerKind::Venue, "hop", now()).await.unwrap();
        assert_eq!(venues.count, 1);
        assert_eq!(venues.data[0].name, "The Musical Hop");

        let artists = catalog.search_at(OwnerKind::Artist, "A", now()).await.unwrap();
        assert_eq!(artists.count, 3);
        let sax = artists.data.iter().find(|h| h.id == 6).unwrap();
        assert_eq!(sax.num_upcoming_shows, 2);

        let none = catalog.search_at(OwnerKind::Artist, "zzz", now()).await.unwrap();
        assert_eq!(none.count, 0);
    }

    #[tokio::test]
    async fn test_dangling_show_fails_listing_and_partition() {
        let mut store = catalog().store().clone();
        store.shows.push(show(6, 99, 1, Duration::days(1)));
        let catalog = Catalog::new(store);

        assert!(matches!(
            catalog.partition_shows_at(OwnerKind::Venue, 1, now()).await,
            Err(Error::Integrity(_))
        ));
        assert!(matches!(catalog.venues_by_area_at(now()).await, Err(Error::Integrity(_))));
        assert!(matches!(catalog.show_listings().await, Err(Error::Integrity(_))));
    }

    #[tokio::test]
    async fn test_show_listings_in_storage_order() {
        let listings = catalog().show_listings().await.unwrap();

        assert_eq!(listings.len(), 5);
        assert_eq!(listings[0].venue_name, "The Musical Hop");
        assert_eq!(listings[0].artist_name, "Guns N Petals");
        assert_eq!(
            listings[0].artist_image_link.as_deref(),
            Some("https://img.example/artist4.jpg")
        );
        assert_eq!(listings[4].venue_id, 3);
    }
}
