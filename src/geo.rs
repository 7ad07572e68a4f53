//! Geographic point type shared by every part of the crate.

use serde::{Deserialize, Serialize};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Callers are expected to keep `lat` within [-90, 90] and `lon` within
/// [-180, 180]; nothing here enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the point with its latitude and longitude fields exchanged.
    ///
    /// Used when a data source stored the two values in the wrong fields.
    pub fn swapped(self) -> Self {
        Self {
            lat: self.lon,
            lon: self.lat,
        }
    }

    /// Great-circle (haversine) distance to `other` in kilometers.
    pub fn haversine_km(&self, other: &GeoPoint) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl From<(f64, f64)> for GeoPoint {
    /// Builds a point from a `(lat, lon)` tuple.
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}
