//! Show listing and show creation

use axum::{extract::State, response::Response, routing::get, Form, Json, Router};
use fyyur_common::catalog::ShowListing;
use fyyur_common::db::shows;
use fyyur_common::time;
use serde::Serialize;
use tracing::info;

use super::{see_other, StartTime};
use crate::forms::{self, FormDescription, FormFields};
use crate::{ApiError, ApiResult, AppState};

const SHOW_FAILURE_NOTICE: &str = "An error occurred. Show could not be listed.";

#[derive(Debug, Serialize)]
pub struct ShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    #[serde(flatten)]
    pub start: StartTime,
}

impl From<ShowListing> for ShowEntry {
    fn from(listing: ShowListing) -> Self {
        Self {
            venue_id: listing.venue_id,
            venue_name: listing.venue_name,
            artist_id: listing.artist_id,
            artist_name: listing.artist_name,
            artist_image_link: listing.artist_image_link,
            start: StartTime::from(listing.start_time),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowsResponse {
    pub shows: Vec<ShowEntry>,
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<ShowsResponse>> {
    let shows = state
        .catalog()
        .show_listings()
        .await?
        .into_iter()
        .map(ShowEntry::from)
        .collect();
    Ok(Json(ShowsResponse { shows }))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<FormDescription> {
    Json(FormDescription::show(time::now()))
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let reject = |e| ApiError::rejected(SHOW_FAILURE_NOTICE, e);

    let show = forms::new_show(&FormFields::new(pairs)).map_err(reject)?;
    let id = shows::insert_show(&state.db, &show).await.map_err(reject)?;

    info!(
        "Listed show {} (artist {}, venue {})",
        id, show.artist_id, show.venue_id
    );
    Ok(see_other(
        "/shows".to_string(),
        "Show was successfully listed!".to_string(),
        id,
    ))
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
