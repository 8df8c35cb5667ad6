//! Venue pages: area listing, search, detail, create and edit

use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Form, Json, Router,
};
use fyyur_common::catalog::{Area, SearchResults};
use fyyur_common::db::{venues, Venue};
use fyyur_common::OwnerKind;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{failure_notice, form_values, parse_id, see_other, OwnerPage};
use crate::forms::{self, FormDescription, FormFields};
use crate::{ApiError, ApiResult, AppState};

/// Notice attached to a search with no matches
pub const NO_RESULTS_NOTICE: &str = "No results found. Please refine your search.";

#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    pub results: SearchResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

impl SearchResponse {
    pub fn new(search_term: String, results: SearchResults) -> Self {
        let notice = results.is_empty().then_some(NO_RESULTS_NOTICE);
        Self {
            search_term,
            results,
            notice,
        }
    }
}

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<AreasResponse>> {
    let areas = state.catalog().venues_by_area().await?;
    debug!("Venue listing: {} area(s)", areas.len());
    Ok(Json(AreasResponse { areas }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Json<SearchResponse>> {
    let term = FormFields::new(pairs).text("search_term").unwrap_or_default();
    let results = state.catalog().search(OwnerKind::Venue, &term).await?;
    Ok(Json(SearchResponse::new(term, results)))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<OwnerPage<Venue>>> {
    let venue = load_venue(&state, &raw_id).await?;
    let shows = state
        .catalog()
        .partition_shows(OwnerKind::Venue, venue.id)
        .await?;
    Ok(Json(OwnerPage::new(venue, OwnerKind::Venue, &shows)))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<FormDescription> {
    Json(FormDescription::venue(Value::Null))
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let fields = FormFields::new(pairs);
    let name = fields.text("name");
    let reject = |e| ApiError::rejected(failure_notice(OwnerKind::Venue, name.as_deref(), "listed"), e);

    let details = forms::venue_details(&fields).map_err(reject)?;
    let id = venues::insert_venue(&state.db, &details)
        .await
        .map_err(reject)?;

    info!("Listed venue {} '{}'", id, details.name);
    Ok(see_other(
        format!("/venues/{}", id),
        format!("Venue {} was successfully listed!", details.name),
        id,
    ))
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<FormDescription>> {
    let venue = load_venue(&state, &raw_id).await?;
    Ok(Json(FormDescription::venue(form_values(&venue)?)))
}

/// POST /venues/:id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let id = load_venue(&state, &raw_id).await?.id;

    let fields = FormFields::new(pairs);
    let name = fields.text("name");
    let reject = |e| ApiError::rejected(failure_notice(OwnerKind::Venue, name.as_deref(), "updated"), e);

    let details = forms::venue_details(&fields).map_err(reject)?;
    venues::update_venue(&state.db, id, &details)
        .await
        .map_err(reject)?;

    Ok(see_other(
        format!("/venues/{}", id),
        format!("Venue {} was successfully updated!", details.name),
        id,
    ))
}

async fn load_venue(state: &AppState, raw_id: &str) -> ApiResult<Venue> {
    let id = parse_id(raw_id, OwnerKind::Venue)?;
    venues::get_venue(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("venue {}", id)))
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/:id", get(show_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(edit_venue))
}
