//! Route geometry codec.
//!
//! The routing service returns geometry either as an encoded polyline
//! string (precision 5) or as GeoJSON `[lon, lat]` pairs. Both are turned
//! into a [`Polyline`] of `(lat, lon)` points here, at the boundary, so the
//! rest of the crate never sees either wire format.

use serde::{Deserialize, Serialize};

use crate::error::PolylineError;
use crate::geo::GeoPoint;

/// Scale factor for precision-5 polylines.
const PRECISION_FACTOR: f64 = 1e5;

/// Offset added to every 5-bit group by the encoder.
const CHAR_OFFSET: u8 = 63;

/// Continuation flag within a decoded group.
const CONTINUATION_BIT: u64 = 0x20;

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<GeoPoint> {
        self.points.last().copied()
    }
}

impl From<Vec<GeoPoint>> for Polyline {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

/// Decodes a precision-5 encoded polyline into `(lat, lon)` points.
///
/// Each point is two zig-zag encoded deltas (latitude first) accumulated
/// onto running totals. An empty string decodes to an empty polyline.
/// Truncated input, bytes outside the encoder's alphabet, and values or
/// running totals that leave 64 bits are reported as errors.
pub fn decode_polyline(encoded: &str) -> Result<Polyline, PolylineError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        lat = accumulate(lat, bytes, &mut index)?;
        lon = accumulate(lon, bytes, &mut index)?;
        points.push(GeoPoint::new(
            lat as f64 / PRECISION_FACTOR,
            lon as f64 / PRECISION_FACTOR,
        ));
    }

    Ok(Polyline::new(points))
}

/// Adds the next delta onto a running total.
fn accumulate(total: i64, bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let offset = *index;
    let delta = next_delta(bytes, index)?;
    total
        .checked_add(delta)
        .ok_or(PolylineError::Overflow { offset })
}

/// Reads one variable-length value starting at `index` and returns its
/// signed delta. `index` is left just past the value's last byte.
fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let start = *index;
    let mut result: u64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes
            .get(*index)
            .ok_or(PolylineError::UnexpectedEnd { offset: *index })?;
        let group = byte
            .checked_sub(CHAR_OFFSET)
            .filter(|group| *group < 64)
            .ok_or(PolylineError::InvalidCharacter {
                offset: *index,
                byte,
            })? as u64;
        *index += 1;

        let bits = group & 0x1f;
        // Past 59 only part of the five-bit group still fits in 64 bits.
        if shift >= u64::BITS || (shift > 59 && bits >> (u64::BITS - shift) != 0) {
            return Err(PolylineError::Overflow { offset: start });
        }
        result |= bits << shift;
        shift += 5;

        if group < CONTINUATION_BIT {
            break;
        }
    }

    Ok(zigzag(result))
}

/// Odd raw values encode negatives as the one's complement of `raw >> 1`.
fn zigzag(raw: u64) -> i64 {
    let magnitude = (raw >> 1) as i64;
    if raw & 1 == 1 { !magnitude } else { magnitude }
}

/// Converts GeoJSON `[lon, lat]` pairs into `(lat, lon)` points.
///
/// A missing coordinate array yields an empty polyline. Entries with fewer
/// than two numbers are skipped; any extra values (elevation) are ignored.
pub fn normalize_geojson_coordinates(raw: Option<&[Vec<f64>]>) -> Polyline {
    let Some(raw) = raw else {
        return Polyline::default();
    };

    raw.iter()
        .filter_map(|pair| match pair.as_slice() {
            [lon, lat, ..] => Some(GeoPoint::new(*lat, *lon)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .into()
}
