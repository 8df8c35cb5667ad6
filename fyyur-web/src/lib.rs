//! fyyur-web library - venue and artist booking directory service
//!
//! JSON over HTTP for browsing venues, artists and shows, and for listing or
//! editing them through urlencoded form posts.

use axum::Router;
use fyyur_common::db::SqliteStore;
use fyyur_common::Catalog;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod forms;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Catalog queries over this state's database
    pub fn catalog(&self) -> Catalog<SqliteStore> {
        Catalog::new(SqliteStore::new(self.db.clone()))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::home_routes())
        .merge(api::health_routes())
        .merge(api::venue_routes())
        .merge(api::artist_routes())
        .merge(api::show_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
