//! Case-insensitive name search

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Matches for one search term; `count` always equals `data.len()`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchHit>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Whether `name` contains `term`, ignoring case
///
/// The term is trimmed first; an empty term matches everything.
pub fn matches(term: &str, name: &str) -> bool {
    let term = term.trim();
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

/// Filter `(id, name)` candidates by `term`, keeping candidate order
pub fn search<'a, I>(term: &str, candidates: I, upcoming: &HashMap<i64, usize>) -> SearchResults
where
    I: IntoIterator<Item = (i64, &'a str)>,
{
    let data: Vec<SearchHit> = candidates
        .into_iter()
        .filter(|(_, name)| matches(term, name))
        .map(|(id, name)| SearchHit {
            id,
            name: name.to_string(),
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
        })
        .collect();

    SearchResults {
        count: data.len(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VENUES: [(i64, &str); 3] = [
        (1, "The Musical Hop"),
        (2, "The Dueling Pianos Bar"),
        (3, "Park Square Live Music & Coffee"),
    ];

    #[test]
    fn test_hop_matches_only_musical_hop() {
        let results = search("hop", VENUES[..2].iter().copied(), &HashMap::new());
        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "The Musical Hop");
    }

    #[test]
    fn test_music_matches_two_case_insensitively() {
        let results = search("MUSIC", VENUES.iter().copied(), &HashMap::new());
        let ids: Vec<i64> = results.data.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(results.count, results.data.len());
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let results = search("", VENUES.iter().copied(), &HashMap::new());
        assert_eq!(results.count, 3);
        let results = search("   ", VENUES.iter().copied(), &HashMap::new());
        assert_eq!(results.count, 3);
    }

    #[test]
    fn test_absent_term_gives_empty_result() {
        let results = search("polka", VENUES.iter().copied(), &HashMap::new());
        assert!(results.is_empty());
        assert!(results.data.is_empty());
    }

    #[test]
    fn test_hits_carry_upcoming_counts() {
        let mut upcoming = HashMap::new();
        upcoming.insert(3, 2);
        let results = search("park", VENUES.iter().copied(), &upcoming);
        assert_eq!(results.data[0].num_upcoming_shows, 2);
    }
}
