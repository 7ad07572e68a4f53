//! Straight-line estimates, for CO2 mode and when no route was found.
//!
//! Uses great-circle distance, so roads are ignored. Always available.

use crate::geo::GeoPoint;
use crate::polyline::Polyline;

/// Emission factor assumed for an unknown vehicle, in grams per km.
pub const DEFAULT_GRAMS_PER_KM: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Co2Estimate {
    pub distance_km: f64,
    pub grams_per_km: f64,
    pub total_grams: f64,
}

/// Estimates emissions between two points.
///
/// `grams_per_km` falls back to [`DEFAULT_GRAMS_PER_KM`] when `None`.
pub fn estimate(from: GeoPoint, to: GeoPoint, grams_per_km: Option<f64>) -> Co2Estimate {
    let grams_per_km = grams_per_km.unwrap_or(DEFAULT_GRAMS_PER_KM);
    let distance_km = from.haversine_km(&to);
    Co2Estimate {
        distance_km,
        grams_per_km,
        total_grams: distance_km * grams_per_km,
    }
}

/// Two-point geometry drawn in place of a route.
pub fn straight_line(from: GeoPoint, to: GeoPoint) -> Polyline {
    Polyline::new(vec![from, to])
}
