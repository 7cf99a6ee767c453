//! Great-circle distance math.
//!
//! Haversine distance over a spherical Earth. Good to ~0.5% against
//! ellipsoidal geodesics, which is ample for tariff distance bands.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers (IUGG).
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A resolved geographic coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Whether the pair lies in the valid lat/lon range.
    pub fn is_valid(self) -> bool {
        self.lat.abs() <= 90.0 && self.lon.abs() <= 180.0
    }
}

/// Great-circle distance between two coordinates in kilometers.
pub fn great_circle_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Round a distance to 2 decimal places, the precision quotes carry.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
