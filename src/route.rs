//! Normalized route model.
//!
//! Every service response, whatever its geometry encoding, ends up as a
//! [`Route`]. Routes are immutable once built.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// Travel mode requested from the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Driving,
    Cycling,
    Walking,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Driving, Profile::Cycling, Profile::Walking];

    /// Path segment used in service URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Driving => "driving",
            Profile::Cycling => "cycling",
            Profile::Walking => "walking",
        }
    }

    /// Human-readable label ("Driving", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Profile::Driving => "Driving",
            Profile::Cycling => "Cycling",
            Profile::Walking => "Walking",
        }
    }

    /// Parses a profile name, ignoring case.
    pub fn parse(name: &str) -> Option<Self> {
        Profile::ALL
            .into_iter()
            .find(|profile| profile.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate path between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub profile: Profile,
    pub profile_label: String,
    /// Rank among the service's alternatives for this profile, from 0.
    pub alternative_index: usize,
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// May be empty: such a route is still listed but cannot be drawn or
    /// animated.
    pub coordinates: Polyline,
}

impl Route {
    pub fn new(
        profile: Profile,
        alternative_index: usize,
        distance_meters: f64,
        duration_seconds: f64,
        coordinates: Polyline,
    ) -> Self {
        Self {
            profile,
            profile_label: profile.label().to_string(),
            alternative_index,
            distance_meters,
            duration_seconds,
            coordinates,
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn is_drawable(&self) -> bool {
        !self.coordinates.is_empty()
    }

    /// List entry label, e.g. `Driving #1 — 12.34 km / 18 min`.
    pub fn label(&self) -> String {
        format!(
            "{} #{} — {:.2} km / {}",
            self.profile_label,
            self.alternative_index + 1,
            self.distance_km(),
            format_duration(self.duration_seconds)
        )
    }

    /// Caption shown once the route is selected.
    pub fn selected_caption(&self) -> String {
        format!(
            "{} selected — {:.2} km / {}",
            self.profile_label,
            self.distance_km(),
            format_duration(self.duration_seconds)
        )
    }

    /// Operator-facing one-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{} idx={} — {:.2} km, {:.0} min, pts={}",
            self.profile_label,
            self.alternative_index,
            self.distance_km(),
            self.duration_seconds / 60.0,
            self.coordinates.len()
        )
    }
}

/// Formats a duration in seconds as `N s`, `N min` or `H h M m`.
pub fn format_duration(seconds: f64) -> String {
    let seconds = seconds.round().max(0.0) as u64;
    if seconds < 60 {
        return format!("{} s", seconds);
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} min", minutes);
    }
    format!("{} h {} m", minutes / 60, minutes % 60)
}

/// Ordered routes produced by one fetch.
///
/// Duplicates (same profile and alternative index) are legal and kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn as_slice(&self) -> &[Route] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// First (service-preferred) route for `profile`, if any.
    pub fn primary(&self, profile: Profile) -> Option<&Route> {
        self.routes.iter().find(|route| route.profile == profile)
    }

    pub(crate) fn extend(&mut self, routes: impl IntoIterator<Item = Route>) {
        self.routes.extend(routes);
    }
}

impl From<Vec<Route>> for RouteSet {
    fn from(routes: Vec<Route>) -> Self {
        Self::new(routes)
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}
