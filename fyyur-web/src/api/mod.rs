//! HTTP API handlers for fyyur-web

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::home_routes;
pub use shows::show_routes;
pub use venues::venue_routes;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use fyyur_common::catalog::{PartitionedShows, ShowSummary};
use fyyur_common::time::{format_start_time, DisplayFormat};
use fyyur_common::OwnerKind;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::{ApiError, ApiResult};

/// Fallback for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound("no such page".to_string())
}

/// Path ids that are not numbers name nothing, so they are 404s
pub(crate) fn parse_id(raw: &str, kind: OwnerKind) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::NotFound(format!("{} {}", kind.label().to_lowercase(), raw)))
}

/// `303 See Other` after a successful create or edit
pub(crate) fn see_other(location: String, notice: String, id: i64) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location)],
        Json(json!({ "notice": notice, "id": id })),
    )
        .into_response()
}

/// Generic failure notice for a create or edit submission
pub(crate) fn failure_notice(kind: OwnerKind, name: Option<&str>, action: &str) -> String {
    match name {
        Some(name) => format!(
            "An error occurred. {} {} could not be {}.",
            kind.label(),
            name,
            action
        ),
        None => format!("An error occurred. {} could not be {}.", kind.label(), action),
    }
}

/// Start time plus its display string
#[derive(Debug, Serialize)]
pub struct StartTime {
    pub start_time: String,
    pub start_time_display: String,
}

impl From<chrono::DateTime<chrono::Utc>> for StartTime {
    fn from(instant: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            start_time: instant.to_rfc3339(),
            start_time_display: format_start_time(instant, DisplayFormat::Medium),
        }
    }
}

/// Venue or artist detail page
///
/// Show entries are keyed by the counterpart: a venue page lists
/// `artist_id`/`artist_name`/`artist_image_link`, an artist page the venue
/// equivalents.
#[derive(Debug, Serialize)]
pub struct OwnerPage<T: Serialize> {
    #[serde(flatten)]
    pub record: T,
    pub past_shows: Vec<Value>,
    pub upcoming_shows: Vec<Value>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T: Serialize> OwnerPage<T> {
    pub fn new(record: T, kind: OwnerKind, shows: &PartitionedShows) -> Self {
        Self {
            record,
            past_shows: show_entries(kind, &shows.past),
            upcoming_shows: show_entries(kind, &shows.upcoming),
            past_shows_count: shows.past_count(),
            upcoming_shows_count: shows.upcoming_count(),
        }
    }
}

fn show_entries(kind: OwnerKind, shows: &[ShowSummary]) -> Vec<Value> {
    let prefix = kind.counterpart().label().to_lowercase();
    shows
        .iter()
        .map(|show| {
            let start = StartTime::from(show.start_time);
            let mut entry = Map::new();
            entry.insert(format!("{}_id", prefix), json!(show.counterpart_id));
            entry.insert(format!("{}_name", prefix), json!(show.counterpart_name));
            entry.insert(
                format!("{}_image_link", prefix),
                json!(show.counterpart_image_link),
            );
            entry.insert("start_time".to_string(), json!(start.start_time));
            entry.insert(
                "start_time_display".to_string(),
                json!(start.start_time_display),
            );
            Value::Object(entry)
        })
        .collect()
}

/// Prefilled form values for an existing record
pub(crate) fn form_values<T: Serialize>(record: &T) -> ApiResult<Value> {
    serde_json::to_value(record).map_err(|e| ApiError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_show_entries_keyed_by_counterpart() {
        let shows = PartitionedShows {
            past: vec![ShowSummary {
                counterpart_id: 4,
                counterpart_name: "Guns N Petals".to_string(),
                counterpart_image_link: None,
                start_time: Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap(),
            }],
            upcoming: vec![],
        };

        let page = OwnerPage::new(json!({ "id": 1 }), OwnerKind::Venue, &shows);
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["past_shows_count"], 1);
        assert_eq!(json["past_shows"][0]["artist_name"], "Guns N Petals");
        assert_eq!(json["past_shows"][0]["start_time_display"], "Tue 05, 21, 2019 9:30PM");
        assert!(json["past_shows"][0]["artist_image_link"].is_null());
    }

    #[test]
    fn test_failure_notice_names_record() {
        assert_eq!(
            failure_notice(OwnerKind::Venue, Some("The Musical Hop"), "listed"),
            "An error occurred. Venue The Musical Hop could not be listed."
        );
        assert_eq!(
            failure_notice(OwnerKind::Artist, None, "updated"),
            "An error occurred. Artist could not be updated."
        );
    }
}
