//! Test fixtures for ecoroute.
//!
//! Provides a scripted in-memory routing transport that records every URL
//! it is asked for, plus canned OSRM response bodies.

#![allow(dead_code)]

use std::cell::RefCell;

use ecoroute::error::FetchError;
use ecoroute::geo::GeoPoint;
use ecoroute::traits::{RawResponse, RouteTransport};

pub const BASE_URL: &str = "http://osrm.test";

/// Encodes (38.5, -120.2), (40.7, -120.95), (43.252, -126.453).
pub const THREE_POINT_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

/// Encodes (38.5, -120.2).
pub const ONE_POINT_POLYLINE: &str = "_p~iF~ps|U";

pub const EMPTY_ROUTES: &str = r#"{"code":"Ok","routes":[],"waypoints":[]}"#;

/// Start/end with distinct lat and lon, so URL coordinates show which pass
/// built them.
pub fn start() -> GeoPoint {
    GeoPoint::new(12.5, 77.25)
}

pub fn end() -> GeoPoint {
    GeoPoint::new(13.75, 80.5)
}

/// `lon,lat;lon,lat` text that the as-provided pass puts in its URLs.
pub const AS_PROVIDED_COORDS: &str = "77.250000,12.500000;80.500000,13.750000";

/// Text produced by the swapped pass (and, identically, the lat,lon URL pass).
pub const SWAPPED_COORDS: &str = "12.500000,77.250000;13.750000,80.500000";

pub fn polyline_body(geometries: &[&str]) -> String {
    let routes = geometries
        .iter()
        .enumerate()
        .map(|(i, geometry)| {
            format!(
                r#"{{"geometry":"{}","distance":{},"duration":{}}}"#,
                geometry,
                1_500.0 + i as f64 * 250.0,
                300.0 + i as f64 * 60.0
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    format!(r#"{{"code":"Ok","routes":[{routes}]}}"#)
}

/// One GeoJSON route whose coordinates are given as `[lon, lat]` pairs.
pub fn geojson_body(lon_lat: &[(f64, f64)]) -> String {
    let coords = lon_lat
        .iter()
        .map(|(lon, lat)| format!("[{lon},{lat}]"))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        r#"{{"code":"Ok","routes":[{{"geometry":{{"type":"LineString","coordinates":[{coords}]}},"distance":2100.0,"duration":480.0}}]}}"#
    )
}

type Responder = Box<dyn Fn(&str) -> Result<RawResponse, FetchError>>;

/// Routing transport answering from a closure and recording each URL.
pub struct ScriptedTransport {
    responder: Responder,
    requests: RefCell<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(responder: impl Fn(&str) -> Result<RawResponse, FetchError> + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Answers 200 with `body` for every request.
    pub fn always(body: &'static str) -> Self {
        Self::new(move |_| Ok(RawResponse::new(200, body)))
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl RouteTransport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        (self.responder)(url)
    }
}

pub fn ok(body: impl Into<String>) -> Result<RawResponse, FetchError> {
    Ok(RawResponse::new(200, body))
}

pub fn is_request(url: &str, profile: &str, geometries: &str, coords: &str) -> bool {
    url.contains(&format!("/route/v1/{profile}/{coords}?"))
        && url.contains(&format!("geometries={geometries}"))
}
