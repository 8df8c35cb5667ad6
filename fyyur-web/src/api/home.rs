//! Home page: totals and the newest listings

use axum::{extract::State, routing::get, Json, Router};
use fyyur_common::db::{artists, shows, venues};
use serde::Serialize;

use crate::{ApiResult, AppState};

/// How many recent venues and artists the home page shows
pub const RECENT_LIMIT: i64 = 10;

#[derive(Debug, Serialize)]
pub struct RecentEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub venue_count: i64,
    pub artist_count: i64,
    pub show_count: i64,
    pub recent_venues: Vec<RecentEntry>,
    pub recent_artists: Vec<RecentEntry>,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> ApiResult<Json<HomeResponse>> {
    let recent_venues = venues::recent_venues(&state.db, RECENT_LIMIT)
        .await?
        .into_iter()
        .map(|v| RecentEntry {
            id: v.id,
            name: v.details.name,
        })
        .collect();
    let recent_artists = artists::recent_artists(&state.db, RECENT_LIMIT)
        .await?
        .into_iter()
        .map(|a| RecentEntry {
            id: a.id,
            name: a.details.name,
        })
        .collect();

    Ok(Json(HomeResponse {
        venue_count: venues::count_venues(&state.db).await?,
        artist_count: artists::count_artists(&state.db).await?,
        show_count: shows::count_shows(&state.db).await?,
        recent_venues,
        recent_artists,
    }))
}

/// Build home page routes
pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}
