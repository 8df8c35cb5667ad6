//! Form decoding and form descriptions
//!
//! Submissions arrive as urlencoded pairs. Values are trimmed, blank optional
//! fields become `None`, repeated `genres` keys form the tag list and a
//! checkbox counts as set when its value is `y`.

use chrono::{DateTime, Utc};
use fyyur_common::db::{ArtistDetails, NewShow, VenueDetails};
use fyyur_common::genres::GENRE_CHOICES;
use fyyur_common::{time, Error, Genres, Result};
use serde::Serialize;
use serde_json::Value;

/// US state abbreviations offered by the venue and artist forms
pub const STATE_CHOICES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Raw urlencoded pairs in submission order
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value for `name`, trimmed; blank counts as absent
    pub fn text(&self, name: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    pub fn required(&self, name: &str) -> Result<String> {
        self.text(name)
            .ok_or_else(|| Error::InvalidInput(format!("{} is required", name)))
    }

    /// Every value submitted under `name`
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.text(name).map(|v| v.to_ascii_lowercase()).as_deref(),
            Some("y" | "yes" | "on" | "true" | "1")
        )
    }

    pub fn id(&self, name: &str) -> Result<i64> {
        let raw = self.required(name)?;
        raw.parse::<i64>()
            .map_err(|_| Error::InvalidInput(format!("{} must be a numeric id, got '{}'", name, raw)))
    }

    fn state(&self) -> Result<String> {
        let state = self.required("state")?.to_ascii_uppercase();
        if STATE_CHOICES.contains(&state.as_str()) {
            Ok(state)
        } else {
            Err(Error::InvalidInput(format!("unknown state '{}'", state)))
        }
    }

    fn genres(&self) -> Result<Genres> {
        Genres::from_tags(self.all("genres"))
    }

    /// Description text, kept only while the seeking flag is set
    fn seeking_description(&self, seeking: bool) -> String {
        if seeking {
            self.text("seeking_description").unwrap_or_default()
        } else {
            String::new()
        }
    }
}

/// Decode a venue create or edit submission
pub fn venue_details(form: &FormFields) -> Result<VenueDetails> {
    let seeking_talent = form.flag("seeking_talent");
    Ok(VenueDetails {
        name: form.required("name")?,
        city: form.required("city")?,
        state: form.state()?,
        address: form.required("address")?,
        phone: form.text("phone"),
        website: form.text("website"),
        facebook_link: form.text("facebook_link"),
        image_link: form.text("image_link"),
        genres: form.genres()?,
        seeking_talent,
        seeking_description: form.seeking_description(seeking_talent),
    })
}

/// Decode an artist create or edit submission
pub fn artist_details(form: &FormFields) -> Result<ArtistDetails> {
    let seeking_venue = form.flag("seeking_venue");
    Ok(ArtistDetails {
        name: form.required("name")?,
        city: form.required("city")?,
        state: form.state()?,
        phone: form.text("phone"),
        website: form.text("website"),
        facebook_link: form.text("facebook_link"),
        image_link: form.text("image_link"),
        genres: form.genres()?,
        seeking_venue,
        seeking_description: form.seeking_description(seeking_venue),
    })
}

/// Decode a show submission; the start time is free text
pub fn new_show(form: &FormFields) -> Result<NewShow> {
    Ok(NewShow {
        artist_id: form.id("artist_id")?,
        venue_id: form.id("venue_id")?,
        start_time: time::parse_start_time(&form.required("start_time")?)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Select,
    MultiSelect,
    Checkbox,
    DateTime,
    Id,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(name: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        required,
    }
}

/// What a client needs to render a create or edit form
#[derive(Debug, Clone, Serialize)]
pub struct FormDescription {
    pub fields: Vec<FieldSpec>,
    #[serde(skip_serializing_if = "no_choices")]
    pub genre_choices: &'static [&'static str],
    #[serde(skip_serializing_if = "no_choices")]
    pub state_choices: &'static [&'static str],
    /// Prefilled values, when editing
    pub values: Value,
}

fn no_choices(choices: &&'static [&'static str]) -> bool {
    choices.is_empty()
}

fn profile_fields(seeking_flag: &'static str, with_address: bool) -> Vec<FieldSpec> {
    let mut fields = vec![
        field("name", FieldKind::Text, true),
        field("city", FieldKind::Text, true),
        field("state", FieldKind::Select, true),
    ];
    if with_address {
        fields.push(field("address", FieldKind::Text, true));
    }
    fields.extend([
        field("phone", FieldKind::Text, false),
        field("image_link", FieldKind::Text, false),
        field("genres", FieldKind::MultiSelect, false),
        field("facebook_link", FieldKind::Text, false),
        field("website", FieldKind::Text, false),
        field(seeking_flag, FieldKind::Checkbox, false),
        field("seeking_description", FieldKind::Text, false),
    ]);
    fields
}

impl FormDescription {
    pub fn venue(values: Value) -> Self {
        Self {
            fields: profile_fields("seeking_talent", true),
            genre_choices: GENRE_CHOICES,
            state_choices: STATE_CHOICES,
            values,
        }
    }

    pub fn artist(values: Value) -> Self {
        Self {
            fields: profile_fields("seeking_venue", false),
            genre_choices: GENRE_CHOICES,
            state_choices: STATE_CHOICES,
            values,
        }
    }

    /// Show form, with the start time defaulting to `now`
    pub fn show(now: DateTime<Utc>) -> Self {
        Self {
            fields: vec![
                field("artist_id", FieldKind::Id, true),
                field("venue_id", FieldKind::Id, true),
                field("start_time", FieldKind::DateTime, true),
            ],
            genre_choices: &[],
            state_choices: &[],
            values: serde_json::json!({ "start_time": now.to_rfc3339() }),
        }
    }
}
