//! Read access the catalog needs from storage

use std::collections::HashMap;

use async_trait::async_trait;

use super::partition::{Counterpart, OwnerKind};
use crate::db::models::{Artist, Show, Venue};
use crate::Result;

/// Storage seam for the catalog
///
/// All list methods return rows in storage insertion order (ascending id).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn venues(&self) -> Result<Vec<Venue>>;

    async fn artists(&self) -> Result<Vec<Artist>>;

    async fn venue(&self, id: i64) -> Result<Option<Venue>>;

    async fn artist(&self, id: i64) -> Result<Option<Artist>>;

    async fn shows(&self) -> Result<Vec<Show>>;

    /// Shows owned by one venue or artist
    async fn shows_for(&self, kind: OwnerKind, owner_id: i64) -> Result<Vec<Show>>;

    /// Display fields for the given venue or artist ids
    ///
    /// Unknown ids are simply absent from the map.
    async fn counterparts(&self, kind: OwnerKind, ids: &[i64])
        -> Result<HashMap<i64, Counterpart>>;
}

/// In-process store over plain vectors
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub venues: Vec<Venue>,
    pub artists: Vec<Artist>,
    pub shows: Vec<Show>,
}

impl MemoryStore {
    pub fn new(venues: Vec<Venue>, artists: Vec<Artist>, shows: Vec<Show>) -> Self {
        Self {
            venues,
            artists,
            shows,
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn venues(&self) -> Result<Vec<Venue>> {
        Ok(self.venues.clone())
    }

    async fn artists(&self) -> Result<Vec<Artist>> {
        Ok(self.artists.clone())
    }

    async fn venue(&self, id: i64) -> Result<Option<Venue>> {
        Ok(self.venues.iter().find(|v| v.id == id).cloned())
    }

    async fn artist(&self, id: i64) -> Result<Option<Artist>> {
        Ok(self.artists.iter().find(|a| a.id == id).cloned())
    }

    async fn shows(&self) -> Result<Vec<Show>> {
        Ok(self.shows.clone())
    }

    async fn shows_for(&self, kind: OwnerKind, owner_id: i64) -> Result<Vec<Show>> {
        Ok(self
            .shows
            .iter()
            .filter(|s| kind.owner_id_of(s) == owner_id)
            .cloned()
            .collect())
    }

    async fn counterparts(
        &self,
        kind: OwnerKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, Counterpart>> {
        let found: Vec<Counterpart> = match kind {
            OwnerKind::Venue => self
                .venues
                .iter()
                .filter(|v| ids.contains(&v.id))
                .map(Counterpart::from)
                .collect(),
            OwnerKind::Artist => self
                .artists
                .iter()
                .filter(|a| ids.contains(&a.id))
                .map(Counterpart::from)
                .collect(),
        };
        Ok(found.into_iter().map(|c| (c.id, c)).collect())
    }
}
