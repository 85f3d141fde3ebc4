//! Shodan Query Builder
//!
//! Turns a port-city name into a geo-bounded Shodan search query. The city
//! table is a fixed list of major ports; a geocoding service would replace
//! it in a production deployment.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::types::QueryError;

/// Geographic coordinates of a port city
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A ready-to-send search query with its anchor coordinates
#[derive(Debug, Clone, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub coords: Coordinates,
}

static PORT_CITIES: Lazy<HashMap<&'static str, Coordinates>> = Lazy::new(|| {
    HashMap::from([
        ("vladivostok", Coordinates { lat: 43.1056, lon: 131.8735 }),
        ("san francisco", Coordinates { lat: 37.7749, lon: -122.4194 }),
        ("shanghai", Coordinates { lat: 31.2304, lon: 121.4737 }),
        ("rotterdam", Coordinates { lat: 51.9244, lon: 4.4777 }),
        ("dubai", Coordinates { lat: 25.2048, lon: 55.2708 }),
        ("singapore", Coordinates { lat: 1.3521, lon: 103.8198 }),
        ("long beach", Coordinates { lat: 33.7701, lon: -118.1937 }),
        ("houston", Coordinates { lat: 29.7604, lon: -95.3698 }),
        ("tokyo", Coordinates { lat: 35.6762, lon: 139.6503 }),
        ("sydney", Coordinates { lat: -33.8688, lon: 151.2093 }),
    ])
});

/// Look up a port city, case-insensitive
pub fn city_coordinates(city_name: &str) -> Option<Coordinates> {
    PORT_CITIES.get(city_name.to_lowercase().trim()).copied()
}

/// Build a geo-bounded search query for a port city.
///
/// Query shape: `geo:"lat,lon,radius" "term"`.
pub fn build_search_query(
    city_name: &str,
    search_term: &str,
    radius_km: u32,
) -> Result<SearchQuery, QueryError> {
    let coords = city_coordinates(city_name).ok_or_else(|| QueryError::UnknownCity {
        city: city_name.to_string(),
    })?;

    let query = format!(
        "geo:\"{},{},{}\" \"{}\"",
        coords.lat, coords.lon, radius_km, search_term
    );

    Ok(SearchQuery { query, coords })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_city() {
        let coords = city_coordinates("Rotterdam").unwrap();
        assert!((coords.lat - 51.9244).abs() < 1e-9);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(city_coordinates("SINGAPORE").is_some());
        assert!(city_coordinates("Long Beach").is_some());
    }

    #[test]
    fn test_unknown_city() {
        assert!(city_coordinates("Atlantis").is_none());
        assert!(matches!(
            build_search_query("Atlantis", "ICS", 5),
            Err(QueryError::UnknownCity { .. })
        ));
    }

    #[test]
    fn test_query_format() {
        let sq = build_search_query("Tokyo", "ICS", 5).unwrap();
        assert_eq!(sq.query, "geo:\"35.6762,139.6503,5\" \"ICS\"");
    }
}
