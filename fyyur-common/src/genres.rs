//! Genre tags
//!
//! Venues and artists carry an ordered list of distinct genre tags. The list
//! is persisted as a single comma-delimited column.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Column delimiter for stored genre lists
pub const DELIMITER: char = ',';

/// Genre choices offered by the create/edit forms
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Ordered, de-duplicated list of genre tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Build from user-supplied tags
    ///
    /// Tags are trimmed; blanks and repeats are dropped, first occurrence
    /// wins. A tag containing the delimiter is rejected.
    pub fn from_tags<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if tag.is_empty() {
                continue;
            }
            if tag.contains(DELIMITER) {
                return Err(Error::InvalidInput(format!(
                    "genre '{}' may not contain '{}'",
                    tag, DELIMITER
                )));
            }
            if !out.iter().any(|existing| existing == tag) {
                out.push(tag.to_string());
            }
        }
        Ok(Self(out))
    }

    /// Decode a stored column value; `None` and empty strings give no tags
    pub fn from_stored(stored: Option<&str>) -> Self {
        let mut out: Vec<String> = Vec::new();
        for tag in stored.unwrap_or_default().split(DELIMITER) {
            let tag = tag.trim();
            if !tag.is_empty() && !out.iter().any(|existing| existing == tag) {
                out.push(tag.to_string());
            }
        }
        Self(out)
    }

    /// Encode for storage
    pub fn to_stored(&self) -> String {
        self.0.join(&DELIMITER.to_string())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tags_keeps_first_seen_order_and_dedupes() {
        let genres = Genres::from_tags(["Jazz", " Folk ", "Jazz", "", "Reggae"]).unwrap();
        assert_eq!(genres.as_slice(), &["Jazz", "Folk", "Reggae"]);
    }

    #[test]
    fn test_from_tags_rejects_delimiter() {
        let err = Genres::from_tags(["Rock, Pop"]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_stored_roundtrip() {
        let genres = Genres::from_tags(["Jazz", "Folk"]).unwrap();
        assert_eq!(genres.to_stored(), "Jazz,Folk");
        assert_eq!(Genres::from_stored(Some("Jazz,Folk")), genres);
    }

    #[test]
    fn test_absent_column_is_empty_list() {
        assert!(Genres::from_stored(None).is_empty());
        assert!(Genres::from_stored(Some("")).is_empty());
        assert_eq!(serde_json::to_string(&Genres::default()).unwrap(), "[]");
    }
}
