//! Route-service response shapes.
//!
//! A response body is parsed into JSON exactly once. The same value feeds
//! the diagnostic snippet and [`ServiceResponse`]; route building never
//! looks at raw JSON.

use serde::Deserialize;

use crate::traits::RawResponse;

/// Outcome of parsing one routing response.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse {
    /// A non-empty `routes` collection.
    Ok(Vec<RawRoute>),
    /// A well-formed `routes` collection with no entries.
    Empty,
    /// Non-success status, non-JSON body, or JSON without `routes`.
    Malformed(String),
}

/// One entry of the `routes` array, before geometry decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRoute {
    pub geometry: RawGeometry,
    pub distance: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawGeometry {
    /// `geometries=polyline`.
    Encoded(String),
    /// `geometries=geojson`; `None` when the object has no `coordinates`.
    GeoJson(Option<Vec<Vec<f64>>>),
    /// Absent, null, or of an unrecognized shape.
    Missing,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Option<Vec<WireRoute>>,
}

#[derive(Deserialize)]
struct WireRoute {
    #[serde(default)]
    geometry: Option<WireGeometry>,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    duration: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireGeometry {
    Encoded(String),
    GeoJson {
        #[serde(default)]
        coordinates: Option<Vec<Vec<f64>>>,
    },
    Other(serde_json::Value),
}

/// A body parsed as JSON, or why it could not be.
pub type ParsedBody = Result<serde_json::Value, serde_json::Error>;

impl ServiceResponse {
    /// Interprets `response` given its already parsed body.
    ///
    /// A non-success status is malformed whatever the body says.
    pub fn from_parsed(response: &RawResponse, body: ParsedBody) -> Self {
        if !response.is_success() {
            return ServiceResponse::Malformed(format!("HTTP status {}", response.status));
        }
        match body {
            Ok(value) => Self::from_value(value),
            Err(err) => ServiceResponse::Malformed(err.to_string()),
        }
    }

    fn from_value(value: serde_json::Value) -> Self {
        let envelope: Envelope = match serde_json::from_value(value) {
            Ok(envelope) => envelope,
            Err(err) => return ServiceResponse::Malformed(err.to_string()),
        };

        let Some(routes) = envelope.routes else {
            let detail = match (envelope.code, envelope.message) {
                (Some(code), Some(message)) => format!(" (code {code}: {message})"),
                (Some(code), None) => format!(" (code {code})"),
                (None, _) => String::new(),
            };
            return ServiceResponse::Malformed(format!("missing routes collection{detail}"));
        };

        if routes.is_empty() {
            return ServiceResponse::Empty;
        }

        ServiceResponse::Ok(routes.into_iter().map(RawRoute::from).collect())
    }
}

impl From<WireRoute> for RawRoute {
    fn from(route: WireRoute) -> Self {
        let geometry = match route.geometry {
            Some(WireGeometry::Encoded(encoded)) => RawGeometry::Encoded(encoded),
            Some(WireGeometry::GeoJson { coordinates }) => RawGeometry::GeoJson(coordinates),
            Some(WireGeometry::Other(_)) | None => RawGeometry::Missing,
        };

        RawRoute {
            geometry,
            distance: route.distance.unwrap_or(0.0),
            duration: route.duration.unwrap_or(0.0),
        }
    }
}
