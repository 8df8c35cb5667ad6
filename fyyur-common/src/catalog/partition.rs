//! Splitting an owner's shows into past and upcoming
//!
//! The same logic serves venues and artists; [`OwnerKind`] says which side
//! of the show is the owner and which side is the counterpart to resolve.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classify::{classify, ShowTiming};
use crate::db::models::{Artist, Show, Venue};
use crate::{Error, Result};

/// Which entity a set of shows belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Venue,
    Artist,
}

impl OwnerKind {
    /// The entity on the other side of a show
    pub fn counterpart(self) -> OwnerKind {
        match self {
            OwnerKind::Venue => OwnerKind::Artist,
            OwnerKind::Artist => OwnerKind::Venue,
        }
    }

    pub fn owner_id_of(self, show: &Show) -> i64 {
        match self {
            OwnerKind::Venue => show.venue_id,
            OwnerKind::Artist => show.artist_id,
        }
    }

    pub fn counterpart_id_of(self, show: &Show) -> i64 {
        self.counterpart().owner_id_of(show)
    }

    pub fn label(self) -> &'static str {
        match self {
            OwnerKind::Venue => "Venue",
            OwnerKind::Artist => "Artist",
        }
    }
}

/// Display fields of the entity across a show from the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counterpart {
    pub id: i64,
    pub name: String,
    pub image_link: Option<String>,
}

impl From<&Venue> for Counterpart {
    fn from(venue: &Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.details.name.clone(),
            image_link: venue.details.image_link.clone(),
        }
    }
}

impl From<&Artist> for Counterpart {
    fn from(artist: &Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.details.name.clone(),
            image_link: artist.details.image_link.clone(),
        }
    }
}

/// One show as seen from its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowSummary {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// An owner's shows split around a reference instant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartitionedShows {
    pub past: Vec<ShowSummary>,
    pub upcoming: Vec<ShowSummary>,
}

impl PartitionedShows {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }

    pub fn total(&self) -> usize {
        self.past.len() + self.upcoming.len()
    }
}

/// Partition the shows of one owner
///
/// Shows not belonging to `owner_id` are ignored. Input order is kept within
/// each side. Every show must have its counterpart in `counterparts`;
/// otherwise the whole call fails so that counts and lists never disagree.
pub fn partition_shows(
    kind: OwnerKind,
    owner_id: i64,
    shows: &[Show],
    counterparts: &HashMap<i64, Counterpart>,
    now: DateTime<Utc>,
) -> Result<PartitionedShows> {
    let mut partitioned = PartitionedShows::default();

    for show in shows.iter().filter(|s| kind.owner_id_of(s) == owner_id) {
        let counterpart_id = kind.counterpart_id_of(show);
        let counterpart = counterparts.get(&counterpart_id).ok_or_else(|| {
            Error::Integrity(format!(
                "show {} references missing {} {}",
                show.id,
                kind.counterpart().label().to_lowercase(),
                counterpart_id
            ))
        })?;

        let summary = ShowSummary {
            counterpart_id,
            counterpart_name: counterpart.name.clone(),
            counterpart_image_link: counterpart.image_link.clone(),
            start_time: show.start_time,
        };

        match classify(show.start_time, now) {
            ShowTiming::Past => partitioned.past.push(summary),
            ShowTiming::Upcoming => partitioned.upcoming.push(summary),
        }
    }

    Ok(partitioned)
}

/// Upcoming-show count for each of `owner_ids`
///
/// Counts go through [`partition_shows`], so a dangling counterpart fails
/// the listing instead of being skipped. Owners without shows map to zero.
pub fn upcoming_counts<I>(
    kind: OwnerKind,
    owner_ids: I,
    shows: &[Show],
    counterparts: &HashMap<i64, Counterpart>,
    now: DateTime<Utc>,
) -> Result<HashMap<i64, usize>>
where
    I: IntoIterator<Item = i64>,
{
    let mut by_owner: HashMap<i64, Vec<Show>> = HashMap::new();
    for show in shows {
        by_owner
            .entry(kind.owner_id_of(show))
            .or_default()
            .push(show.clone());
    }

    let mut counts = HashMap::new();
    for owner_id in owner_ids {
        let count = match by_owner.get(&owner_id) {
            Some(owned) => {
                partition_shows(kind, owner_id, owned, counterparts, now)?.upcoming_count()
            }
            None => 0,
        };
        counts.insert(owner_id, count);
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
    }

    fn show(id: i64, artist_id: i64, venue_id: i64, start_time: DateTime<Utc>) -> Show {
        Show {
            id,
            artist_id,
            venue_id,
            start_time,
        }
    }

    fn venues() -> HashMap<i64, Counterpart> {
        let mut map = HashMap::new();
        map.insert(
            1,
            Counterpart {
                id: 1,
                name: "The Musical Hop".to_string(),
                image_link: Some("https://img.example/hop.jpg".to_string()),
            },
        );
        map.insert(
            3,
            Counterpart {
                id: 3,
                name: "Park Square Live Music & Coffee".to_string(),
                image_link: None,
            },
        );
        map
    }

    #[test]
    fn test_artist_with_one_past_and_one_upcoming_show() {
        let shows = vec![
            show(1, 4, 1, now() - Duration::days(30)),
            show(2, 4, 3, now() + Duration::days(30)),
        ];

        let result = partition_shows(OwnerKind::Artist, 4, &shows, &venues(), now()).unwrap();

        assert_eq!(result.past_count(), 1);
        assert_eq!(result.upcoming_count(), 1);
        assert_eq!(result.past[0].counterpart_id, 1);
        assert_eq!(result.past[0].counterpart_name, "The Musical Hop");
        assert_eq!(
            result.past[0].counterpart_image_link.as_deref(),
            Some("https://img.example/hop.jpg")
        );
        assert_eq!(result.upcoming[0].counterpart_id, 3);
        assert_eq!(result.upcoming[0].counterpart_name, "Park Square Live Music & Coffee");
    }

    #[test]
    fn test_partition_is_complete_and_disjoint() {
        let shows: Vec<Show> = (0..10)
            .map(|i| show(i, 4, 1, now() + Duration::hours(i - 5)))
            .collect();

        let result = partition_shows(OwnerKind::Artist, 4, &shows, &venues(), now()).unwrap();

        assert_eq!(result.total(), shows.len());
        // hours -5..=0 are past (0 is exactly now), 1..=4 upcoming
        assert_eq!(result.past_count(), 6);
        assert_eq!(result.upcoming_count(), 4);
        assert!(result.past.iter().all(|s| s.start_time <= now()));
        assert!(result.upcoming.iter().all(|s| s.start_time > now()));
    }

    #[test]
    fn test_other_owners_shows_are_ignored() {
        let shows = vec![
            show(1, 4, 1, now() + Duration::days(1)),
            show(2, 5, 1, now() + Duration::days(1)),
        ];

        let result = partition_shows(OwnerKind::Artist, 5, &shows, &venues(), now()).unwrap();
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn test_missing_counterpart_fails_whole_partition() {
        let shows = vec![
            show(1, 4, 1, now() - Duration::days(1)),
            show(2, 4, 99, now() + Duration::days(1)),
        ];

        let err = partition_shows(OwnerKind::Artist, 4, &shows, &venues(), now()).unwrap_err();
        match err {
            Error::Integrity(msg) => assert!(msg.contains("venue 99"), "{}", msg),
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_upcoming_counts_defaults_to_zero() {
        let shows = vec![
            show(1, 4, 1, now() - Duration::days(1)),
            show(2, 4, 3, now() + Duration::days(1)),
            show(3, 6, 3, now() + Duration::days(2)),
            show(4, 6, 3, now() + Duration::days(3)),
        ];
        let mut artists = HashMap::new();
        for id in [4, 6] {
            artists.insert(
                id,
                Counterpart {
                    id,
                    name: format!("artist {}", id),
                    image_link: None,
                },
            );
        }

        let counts =
            upcoming_counts(OwnerKind::Venue, [1, 2, 3], &shows, &artists, now()).unwrap();

        assert_eq!(counts[&1], 0);
        assert_eq!(counts[&2], 0);
        assert_eq!(counts[&3], 3);
    }
}
