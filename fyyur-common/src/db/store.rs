//! SQLite-backed [`CatalogStore`]

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use super::models::{Artist, Show, Venue};
use super::{artists, shows, venues};
use crate::catalog::{CatalogStore, Counterpart, OwnerKind};
use crate::Result;

/// Ids bound per counterpart query, well under SQLite's variable limit
const COUNTERPART_BATCH: usize = 500;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn venues(&self) -> Result<Vec<Venue>> {
        venues::list_venues(&self.pool).await
    }

    async fn artists(&self) -> Result<Vec<Artist>> {
        artists::list_artists(&self.pool).await
    }

    async fn venue(&self, id: i64) -> Result<Option<Venue>> {
        venues::get_venue(&self.pool, id).await
    }

    async fn artist(&self, id: i64) -> Result<Option<Artist>> {
        artists::get_artist(&self.pool, id).await
    }

    async fn shows(&self) -> Result<Vec<Show>> {
        shows::list_shows(&self.pool).await
    }

    async fn shows_for(&self, kind: OwnerKind, owner_id: i64) -> Result<Vec<Show>> {
        shows::shows_for_owner(&self.pool, kind, owner_id).await
    }

    async fn counterparts(
        &self,
        kind: OwnerKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, Counterpart>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let table = match kind {
            OwnerKind::Venue => "venues",
            OwnerKind::Artist => "artists",
        };
        let mut found = HashMap::with_capacity(ids.len());
        for batch in ids.chunks(COUNTERPART_BATCH) {
            let placeholders = vec!["?"; batch.len()].join(", ");
            let sql = format!(
                "SELECT id, name, image_link FROM {} WHERE id IN ({})",
                table, placeholders
            );

            let mut query = sqlx::query(&sql);
            for id in batch {
                query = query.bind(*id);
            }

            for row in query.fetch_all(&self.pool).await? {
                let counterpart = Counterpart {
                    id: row.try_get("id")?,
                    name: row.try_get("name")?,
                    image_link: row.try_get("image_link")?,
                };
                found.insert(counterpart.id, counterpart);
            }
        }
        Ok(found)
    }
}
