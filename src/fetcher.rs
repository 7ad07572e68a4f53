//! Route acquisition with a fallback ladder.
//!
//! A fetch runs a list of [`AttemptStrategy`] passes in order. Each pass
//! asks the service for every requested profile, trying polyline geometry
//! first and GeoJSON second. The first pass that produces any route at all
//! wins and later passes are never attempted.
//!
//! Request failures of any kind only ever mean "no routes from this
//! attempt"; they are written to the [`DiagnosticLog`] and the ladder moves
//! on. An empty [`RouteSet`] is a normal result.

use tracing::{debug, info, warn};

use crate::diagnostics::{DiagnosticLog, RequestRecord, ResponseSnippet};
use crate::error::FetchError;
use crate::geo::GeoPoint;
use crate::osrm::{AxisOrder, GeometryEncoding, OsrmClient, route_url};
use crate::polyline::{Polyline, decode_polyline, normalize_geojson_coordinates};
use crate::response::{RawGeometry, RawRoute, ServiceResponse};
use crate::route::{Profile, Route, RouteSet};
use crate::traits::RouteTransport;

/// Routes listed in the closing diagnostic summary.
const SUMMARY_MAX_ROUTES: usize = 8;

/// How the stored point fields are interpreted for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateOrder {
    AsProvided,
    /// Latitude and longitude fields exchanged before building the URL.
    Swapped,
}

/// One rung of the fallback ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptStrategy {
    pub coordinate_order: CoordinateOrder,
    pub url_axis_order: AxisOrder,
}

impl AttemptStrategy {
    pub const AS_PROVIDED: AttemptStrategy = AttemptStrategy {
        coordinate_order: CoordinateOrder::AsProvided,
        url_axis_order: AxisOrder::LonLat,
    };

    /// Compensates for sources that stored lat in the lon field and back.
    pub const SWAPPED: AttemptStrategy = AttemptStrategy {
        coordinate_order: CoordinateOrder::Swapped,
        url_axis_order: AxisOrder::LonLat,
    };

    /// Compensates for a server expecting `lat,lon` in the URL.
    pub const URL_LAT_LON: AttemptStrategy = AttemptStrategy {
        coordinate_order: CoordinateOrder::AsProvided,
        url_axis_order: AxisOrder::LatLon,
    };

    pub fn label(&self) -> &'static str {
        match (self.coordinate_order, self.url_axis_order) {
            (CoordinateOrder::AsProvided, AxisOrder::LonLat) => "as-provided",
            (CoordinateOrder::Swapped, AxisOrder::LonLat) => "swapped",
            (CoordinateOrder::AsProvided, AxisOrder::LatLon) => "url-latlon",
            (CoordinateOrder::Swapped, AxisOrder::LatLon) => "swapped-url-latlon",
        }
    }

    fn apply(&self, point: GeoPoint) -> GeoPoint {
        match self.coordinate_order {
            CoordinateOrder::AsProvided => point,
            CoordinateOrder::Swapped => point.swapped(),
        }
    }
}

/// What to ask for and which ladder to climb.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOptions {
    pub profiles: Vec<Profile>,
    pub strategies: Vec<AttemptStrategy>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            profiles: Profile::ALL.to_vec(),
            strategies: vec![
                AttemptStrategy::AS_PROVIDED,
                AttemptStrategy::SWAPPED,
                AttemptStrategy::URL_LAT_LON,
            ],
        }
    }
}

impl FetchOptions {
    pub fn with_profiles(mut self, profiles: &[Profile]) -> Self {
        self.profiles = profiles.to_vec();
        self
    }

    /// Drops the `lat,lon` URL pass, leaving as-provided then swapped.
    pub fn two_pass(mut self) -> Self {
        self.strategies = vec![AttemptStrategy::AS_PROVIDED, AttemptStrategy::SWAPPED];
        self
    }
}

/// Routes plus the diagnostics gathered while fetching them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    pub routes: RouteSet,
    pub diagnostics: DiagnosticLog,
    /// Label of the pass that produced `routes`, if any did.
    pub winning_pass: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct RouteFetcher<T> {
    transport: T,
    base_url: String,
}

impl RouteFetcher<OsrmClient> {
    pub fn from_client(client: OsrmClient) -> Self {
        let base_url = client.base_url().to_string();
        Self::new(client, base_url)
    }
}

impl<T: RouteTransport> RouteFetcher<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Fetches routes for `profiles` using the full three-pass ladder.
    pub fn fetch_routes(&self, start: GeoPoint, end: GeoPoint, profiles: &[Profile]) -> FetchOutcome {
        self.fetch_with(start, end, &FetchOptions::default().with_profiles(profiles))
    }

    pub fn fetch_with(&self, start: GeoPoint, end: GeoPoint, options: &FetchOptions) -> FetchOutcome {
        let mut diagnostics = DiagnosticLog::new();
        let mut routes = RouteSet::default();
        let mut winning_pass = None;

        for (attempt, strategy) in options.strategies.iter().enumerate() {
            let pass_start = strategy.apply(start);
            let pass_end = strategy.apply(end);
            diagnostics.note(format!(
                "Attempt {}: {} (start {:?}, end {:?})",
                attempt + 1,
                strategy.label(),
                pass_start,
                pass_end
            ));

            let found = self.run_pass(strategy, pass_start, pass_end, &options.profiles, &mut diagnostics);
            debug!(pass = strategy.label(), routes = found.len(), "routing pass complete");

            if !found.is_empty() {
                routes = found;
                winning_pass = Some(strategy.label());
                break;
            }
        }

        diagnostics.note(format!("Final total routes found: {}", routes.len()));
        for route in routes.iter().take(SUMMARY_MAX_ROUTES) {
            diagnostics.note(route.summary());
        }

        match winning_pass {
            Some(pass) => info!(routes = routes.len(), pass, "routes fetched"),
            None => warn!(
                attempts = diagnostics.urls().len(),
                "no routes found on any pass"
            ),
        }

        FetchOutcome {
            routes,
            diagnostics,
            winning_pass,
        }
    }

    /// Every profile, polyline first and GeoJSON if polyline gave nothing.
    fn run_pass(
        &self,
        strategy: &AttemptStrategy,
        start: GeoPoint,
        end: GeoPoint,
        profiles: &[Profile],
        diagnostics: &mut DiagnosticLog,
    ) -> RouteSet {
        let mut found = RouteSet::default();

        for &profile in profiles {
            for encoding in GeometryEncoding::LADDER {
                let url = route_url(&self.base_url, profile, start, end, encoding, strategy.url_axis_order);
                let (snippet, outcome) = self.attempt(&url, profile, encoding);

                match &outcome {
                    Ok(routes) => debug!(
                        pass = strategy.label(),
                        %profile,
                        encoding = encoding.as_str(),
                        %url,
                        routes = routes.len(),
                        "routing request"
                    ),
                    Err(err) => debug!(
                        pass = strategy.label(),
                        %profile,
                        encoding = encoding.as_str(),
                        %url,
                        error = %err,
                        "routing request yielded nothing"
                    ),
                }

                diagnostics.record(RequestRecord {
                    pass: strategy.label(),
                    profile,
                    encoding,
                    url,
                    snippet,
                    outcome: outcome.as_ref().map(Vec::len).map_err(Clone::clone),
                });

                if let Ok(routes) = outcome {
                    if !routes.is_empty() {
                        found.extend(routes);
                        break;
                    }
                }
            }
        }

        found
    }

    fn attempt(
        &self,
        url: &str,
        profile: Profile,
        encoding: GeometryEncoding,
    ) -> (ResponseSnippet, Result<Vec<Route>, FetchError>) {
        let response = match self.transport.get(url) {
            Ok(response) => response,
            Err(err) => return (ResponseSnippet::Error(err.to_string()), Err(err)),
        };

        let body = serde_json::from_str::<serde_json::Value>(&response.body);
        let snippet = ResponseSnippet::capture(&response, body.as_ref().ok());
        let outcome = match ServiceResponse::from_parsed(&response, body) {
            ServiceResponse::Ok(raw) => build_routes(profile, encoding, raw),
            ServiceResponse::Empty => Err(FetchError::NoRoutesFound),
            ServiceResponse::Malformed(reason) => Err(FetchError::MalformedResponse(reason)),
        };

        (snippet, outcome)
    }
}

/// Turns parsed service routes into [`Route`]s, keeping each entry's
/// position in the alternatives array as its index.
///
/// With polyline geometry, entries without geometry are skipped. With
/// GeoJSON they are kept with no coordinates. A geometry that fails to
/// decode fails the whole response.
fn build_routes(
    profile: Profile,
    encoding: GeometryEncoding,
    raw: Vec<RawRoute>,
) -> Result<Vec<Route>, FetchError> {
    let mut routes = Vec::with_capacity(raw.len());

    for (alternative_index, route) in raw.into_iter().enumerate() {
        let coordinates = match (route.geometry, encoding) {
            (RawGeometry::Encoded(encoded), _) if !encoded.is_empty() => decode_polyline(&encoded)?,
            (RawGeometry::GeoJson(coordinates), _) => {
                normalize_geojson_coordinates(coordinates.as_deref())
            }
            (_, GeometryEncoding::Polyline) => continue,
            (_, GeometryEncoding::GeoJson) => Polyline::default(),
        };

        routes.push(Route::new(
            profile,
            alternative_index,
            route.distance,
            route.duration,
            coordinates,
        ));
    }

    Ok(routes)
}
