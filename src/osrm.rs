//! OSRM HTTP adapter for route queries.

use tracing::warn;

use crate::error::FetchError;
use crate::geo::GeoPoint;
use crate::route::Profile;
use crate::traits::{RawResponse, RouteTransport};

/// Public OSRM demo server.
pub const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("ecoroute/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl OsrmConfig {
    /// Defaults overlaid with `OSRM_BASE_URL` and `OSRM_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base_url) = lookup("OSRM_BASE_URL").filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("OSRM_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => warn!(
                    value = %raw,
                    default = DEFAULT_TIMEOUT_SECS,
                    "ignoring invalid OSRM_TIMEOUT_SECS"
                ),
            }
        }

        config
    }
}

/// Blocking HTTP transport for an OSRM server.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

impl RouteTransport for OsrmClient {
    fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse { status, body })
    }
}

/// Geometry format requested with `geometries=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryEncoding {
    Polyline,
    GeoJson,
}

impl GeometryEncoding {
    /// Tried in this order for every profile.
    pub const LADDER: [GeometryEncoding; 2] = [GeometryEncoding::Polyline, GeometryEncoding::GeoJson];

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryEncoding::Polyline => "polyline",
            GeometryEncoding::GeoJson => "geojson",
        }
    }
}

/// Order of the two numbers in each URL coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisOrder {
    /// `lon,lat`, what OSRM documents.
    LonLat,
    /// `lat,lon`.
    LatLon,
}

/// Builds a `route/v1` query for two points.
pub fn route_url(
    base_url: &str,
    profile: Profile,
    start: GeoPoint,
    end: GeoPoint,
    encoding: GeometryEncoding,
    axis_order: AxisOrder,
) -> String {
    format!(
        "{}/route/v1/{}/{};{}?overview=full&geometries={}&alternatives=true",
        base_url.trim_end_matches('/'),
        profile.as_str(),
        url_coordinate(start, axis_order),
        url_coordinate(end, axis_order),
        encoding.as_str()
    )
}

fn url_coordinate(point: GeoPoint, axis_order: AxisOrder) -> String {
    match axis_order {
        AxisOrder::LonLat => format!("{:.6},{:.6}", point.lon, point.lat),
        AxisOrder::LatLon => format!("{:.6},{:.6}", point.lat, point.lon),
    }
}
