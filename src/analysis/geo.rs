//! Static region coordinate lookup.
//!
//! Approximate latitude/longitude centers for the region and country names
//! the marketing data source uses. Regions without an entry stay in the
//! tabular breakdown but are excluded from map output.

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Approximate centers for major regions, countries, and cities.
const REGION_COORDS: &[(&str, Coordinates)] = &[
    ("North America", Coordinates { lat: 45.0, lng: -95.0 }),
    ("South America", Coordinates { lat: -15.0, lng: -60.0 }),
    ("Europe", Coordinates { lat: 54.0, lng: 15.0 }),
    ("Africa", Coordinates { lat: -8.0, lng: 34.0 }),
    ("Middle East", Coordinates { lat: 20.0, lng: 57.0 }),
    ("Asia", Coordinates { lat: 34.0, lng: 100.0 }),
    ("Southeast Asia", Coordinates { lat: 15.0, lng: 107.0 }),
    ("Oceania", Coordinates { lat: -27.0, lng: 133.0 }),
    ("UK", Coordinates { lat: 54.0, lng: -3.0 }),
    ("Germany", Coordinates { lat: 51.0, lng: 10.0 }),
    ("France", Coordinates { lat: 46.0, lng: 2.0 }),
    ("USA", Coordinates { lat: 39.0, lng: -98.0 }),
    ("Canada", Coordinates { lat: 60.0, lng: -95.0 }),
    ("Japan", Coordinates { lat: 36.0, lng: 138.0 }),
    ("India", Coordinates { lat: 20.0, lng: 78.0 }),
    ("Australia", Coordinates { lat: -25.0, lng: 133.0 }),
    ("Brazil", Coordinates { lat: -14.0, lng: -51.0 }),
    ("Mexico", Coordinates { lat: 23.0, lng: -102.0 }),
    ("Spain", Coordinates { lat: 40.0, lng: -4.0 }),
    ("Italy", Coordinates { lat: 41.0, lng: 12.0 }),
    ("Netherlands", Coordinates { lat: 52.0, lng: 5.0 }),
    ("Sweden", Coordinates { lat: 60.0, lng: 18.0 }),
    ("South Korea", Coordinates { lat: 37.0, lng: 127.0 }),
    ("Singapore", Coordinates { lat: 1.0, lng: 104.0 }),
    ("Thailand", Coordinates { lat: 15.0, lng: 101.0 }),
    ("Vietnam", Coordinates { lat: 16.0, lng: 107.0 }),
    ("Philippines", Coordinates { lat: 12.0, lng: 122.0 }),
    ("Indonesia", Coordinates { lat: -2.0, lng: 113.0 }),
    ("Malaysia", Coordinates { lat: 4.0, lng: 102.0 }),
    ("Hong Kong", Coordinates { lat: 22.0, lng: 114.0 }),
    ("China", Coordinates { lat: 35.0, lng: 105.0 }),
    ("Taiwan", Coordinates { lat: 24.0, lng: 121.0 }),
    ("Pakistan", Coordinates { lat: 30.0, lng: 69.0 }),
    ("Bangladesh", Coordinates { lat: 24.0, lng: 90.0 }),
    ("Turkey", Coordinates { lat: 39.0, lng: 35.0 }),
    ("UAE", Coordinates { lat: 24.0, lng: 54.0 }),
    ("United Arab Emirates", Coordinates { lat: 24.0, lng: 54.0 }),
    ("Abu Dhabi", Coordinates { lat: 24.4539, lng: 54.3773 }),
    ("Dubai", Coordinates { lat: 25.2048, lng: 55.2708 }),
    ("Sharjah", Coordinates { lat: 25.3463, lng: 55.4209 }),
    ("Doha", Coordinates { lat: 25.2854, lng: 51.5310 }),
    ("Riyadh", Coordinates { lat: 24.7136, lng: 46.6753 }),
    ("Saudi Arabia", Coordinates { lat: 24.0, lng: 45.0 }),
    ("Egypt", Coordinates { lat: 26.0, lng: 29.0 }),
    ("South Africa", Coordinates { lat: -30.0, lng: 22.0 }),
    ("Nigeria", Coordinates { lat: 9.0, lng: 8.0 }),
    ("Kenya", Coordinates { lat: -1.0, lng: 36.0 }),
    ("Poland", Coordinates { lat: 52.0, lng: 19.0 }),
    ("Belgium", Coordinates { lat: 50.0, lng: 4.0 }),
    ("Switzerland", Coordinates { lat: 47.0, lng: 8.0 }),
];

/// Look up the approximate center for a region or country name.
pub fn coordinates(name: &str) -> Option<Coordinates> {
    REGION_COORDS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, coords)| *coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_region() {
        let uk = coordinates("UK").unwrap();
        assert_eq!(uk.lat, 54.0);
        assert_eq!(uk.lng, -3.0);
    }

    #[test]
    fn test_city_entry() {
        let dubai = coordinates("Dubai").unwrap();
        assert_eq!(dubai.lat, 25.2048);
    }

    #[test]
    fn test_unknown_region() {
        assert!(coordinates("Atlantis").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // Keys match the data source's spelling exactly.
        assert!(coordinates("uk").is_none());
    }
}
