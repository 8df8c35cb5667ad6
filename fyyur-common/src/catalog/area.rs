//! Grouping venues by (state, city) for the venue listing

use std::collections::HashMap;

use serde::Serialize;

use crate::db::models::Venue;

/// Venue entry inside an area group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaVenue {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// All venues sharing one (state, city) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub state: String,
    pub city: String,
    pub venues: Vec<AreaVenue>,
}

/// Group venues by state, then by city within state
///
/// States appear in first-seen order, cities in first-seen order within
/// their state, venues in input order. Same-named cities in different states
/// are separate groups. Venues missing from `upcoming` count zero.
pub fn aggregate_by_area(venues: &[Venue], upcoming: &HashMap<i64, usize>) -> Vec<Area> {
    // state -> index into `states`; (state, city) -> index into that state's cities
    let mut state_index: HashMap<&str, usize> = HashMap::new();
    let mut city_index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut states: Vec<Vec<Area>> = Vec::new();

    for venue in venues {
        let state = venue.details.state.as_str();
        let city = venue.details.city.as_str();

        let s = *state_index.entry(state).or_insert_with(|| {
            states.push(Vec::new());
            states.len() - 1
        });
        let cities = &mut states[s];
        let c = *city_index.entry((state, city)).or_insert_with(|| {
            cities.push(Area {
                state: state.to_string(),
                city: city.to_string(),
                venues: Vec::new(),
            });
            cities.len() - 1
        });

        cities[c].venues.push(AreaVenue {
            id: venue.id,
            name: venue.details.name.clone(),
            num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
        });
    }

    states.into_iter().flatten().collect()
}
