//! Artist pages: listing, search, detail, create and edit

use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Form, Json, Router,
};
use fyyur_common::db::{artists, Artist};
use fyyur_common::OwnerKind;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::venues::SearchResponse;
use super::{failure_notice, form_values, parse_id, see_other, OwnerPage};
use crate::forms::{self, FormDescription, FormFields};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct ArtistEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistsResponse {
    pub artists: Vec<ArtistEntry>,
}

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<ArtistsResponse>> {
    let artists = artists::list_artists(&state.db)
        .await?
        .into_iter()
        .map(|a| ArtistEntry {
            id: a.id,
            name: a.details.name,
        })
        .collect();
    Ok(Json(ArtistsResponse { artists }))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Json<SearchResponse>> {
    let term = FormFields::new(pairs).text("search_term").unwrap_or_default();
    let results = state.catalog().search(OwnerKind::Artist, &term).await?;
    Ok(Json(SearchResponse::new(term, results)))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<OwnerPage<Artist>>> {
    let artist = load_artist(&state, &raw_id).await?;
    let shows = state
        .catalog()
        .partition_shows(OwnerKind::Artist, artist.id)
        .await?;
    Ok(Json(OwnerPage::new(artist, OwnerKind::Artist, &shows)))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<FormDescription> {
    Json(FormDescription::artist(Value::Null))
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let fields = FormFields::new(pairs);
    let name = fields.text("name");
    let reject = |e| ApiError::rejected(failure_notice(OwnerKind::Artist, name.as_deref(), "listed"), e);

    let details = forms::artist_details(&fields).map_err(reject)?;
    let id = artists::insert_artist(&state.db, &details)
        .await
        .map_err(reject)?;

    info!("Listed artist {} '{}'", id, details.name);
    Ok(see_other(
        format!("/artists/{}", id),
        format!("Artist {} was successfully listed!", details.name),
        id,
    ))
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<FormDescription>> {
    let artist = load_artist(&state, &raw_id).await?;
    Ok(Json(FormDescription::artist(form_values(&artist)?)))
}

/// POST /artists/:id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let id = load_artist(&state, &raw_id).await?.id;

    let fields = FormFields::new(pairs);
    let name = fields.text("name");
    let reject = |e| ApiError::rejected(failure_notice(OwnerKind::Artist, name.as_deref(), "updated"), e);

    let details = forms::artist_details(&fields).map_err(reject)?;
    artists::update_artist(&state.db, id, &details)
        .await
        .map_err(reject)?;

    Ok(see_other(
        format!("/artists/{}", id),
        format!("Artist {} was successfully updated!", details.name),
        id,
    ))
}

async fn load_artist(state: &AppState, raw_id: &str) -> ApiResult<Artist> {
    let id = parse_id(raw_id, OwnerKind::Artist)?;
    artists::get_artist(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("artist {}", id)))
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/:id", get(show_artist))
        .route("/artists/:id/edit", get(edit_artist_form).post(edit_artist))
}
