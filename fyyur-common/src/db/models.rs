//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Genres;

/// Everything about a venue except its id
///
/// Create and edit submissions both carry a full `VenueDetails`; edits
/// replace the stored record wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueDetails {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub genres: Genres,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    #[serde(flatten)]
    pub details: VenueDetails,
}

/// Everything about an artist except its id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistDetails {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub genres: Genres,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    #[serde(flatten)]
    pub details: ArtistDetails,
}

/// A booking of one artist at one venue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Show submission before it has an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}
