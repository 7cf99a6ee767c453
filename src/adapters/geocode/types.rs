//! Nominatim API wire types.
//!
//! The search endpoint returns latitude/longitude as JSON strings;
//! parsing to f64 happens here so the rest of the crate only sees
//! typed coordinates.

use serde::Deserialize;

use crate::domain::geo::Coordinates;
use crate::ports::geocoder::Place;

/// One raw search result from `/search?format=jsonv2`.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    /// Full display name, e.g. "Port of Singapore, Singapore".
    pub display_name: String,
    /// Latitude as a decimal string.
    pub lat: String,
    /// Longitude as a decimal string.
    pub lon: String,
}

impl NominatimPlace {
    /// Convert to the port-level `Place`, dropping entries whose
    /// coordinates fail to parse or fall outside the valid range.
    pub fn into_place(self) -> Option<Place> {
        let coordinates = Coordinates {
            lat: self.lat.parse().ok()?,
            lon: self.lon.parse().ok()?,
        };
        coordinates.is_valid().then(|| Place {
            display_name: self.display_name,
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_place_parses_string_coordinates() {
        let raw = NominatimPlace {
            display_name: "Sihanoukville Autonomous Port".to_string(),
            lat: "10.6412".to_string(),
            lon: "103.5103".to_string(),
        };
        let place = raw.into_place().unwrap();
        assert!((place.coordinates.lat - 10.6412).abs() < 1e-9);
        assert!((place.coordinates.lon - 103.5103).abs() < 1e-9);
    }

    #[test]
    fn test_into_place_drops_garbage() {
        let raw = NominatimPlace {
            display_name: "nowhere".to_string(),
            lat: "not-a-number".to_string(),
            lon: "0".to_string(),
        };
        assert!(raw.into_place().is_none());
    }

    #[test]
    fn test_into_place_drops_out_of_range() {
        let raw = NominatimPlace {
            display_name: "bad".to_string(),
            lat: "95.0".to_string(),
            lon: "10.0".to_string(),
        };
        assert!(raw.into_place().is_none());
    }
}
