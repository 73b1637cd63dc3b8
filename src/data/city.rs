//! Static city data for Vietsky
//!
//! This module contains the static list of supported cities with their
//! geographic coordinates.

use super::City;

/// Static array of all supported cities
pub static CITIES: [City; 4] = [
    City {
        id: "hanoi",
        name: "Hanoi",
        latitude: 21.0285,
        longitude: 105.8542,
    },
    City {
        id: "ho-chi-minh",
        name: "Ho Chi Minh",
        latitude: 10.7769,
        longitude: 106.7009,
    },
    City {
        id: "da-nang",
        name: "Da Nang",
        latitude: 16.0471,
        longitude: 108.2068,
    },
    City {
        id: "can-tho",
        name: "Can Tho",
        latitude: 10.0452,
        longitude: 105.7469,
    },
];

/// Returns all supported cities.
pub fn all_cities() -> &'static [City] {
    &CITIES
}

/// Looks up a city by its identifier or display name, case-insensitively.
///
/// Returns `None` if no city matches.
pub fn get_city_by_id(id: &str) -> Option<&'static City> {
    let wanted = id.trim().to_lowercase();
    CITIES
        .iter()
        .find(|c| c.id == wanted || c.name.to_lowercase() == wanted)
}
