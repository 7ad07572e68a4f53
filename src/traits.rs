//! Seams between the routing core and its environment.
//!
//! The fetcher only needs "GET this URL" and the animation only needs
//! somewhere to send marker positions. Concrete apps (and tests) implement
//! these for their own transport and presentation layer.

use crate::error::FetchError;
use crate::geo::GeoPoint;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single GET against the routing service.
///
/// Implementations return [`FetchError::NetworkFailure`] when no response
/// was received (connection refused, timeout, unreadable body). Any response
/// that did arrive, whatever its status, is returned as `Ok`.
pub trait RouteTransport {
    fn get(&self, url: &str) -> Result<RawResponse, FetchError>;
}

impl<T: RouteTransport + ?Sized> RouteTransport for &T {
    fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        (**self).get(url)
    }
}

impl<T: RouteTransport + ?Sized> RouteTransport for Box<T> {
    fn get(&self, url: &str) -> Result<RawResponse, FetchError> {
        (**self).get(url)
    }
}

/// Receives marker positions produced by the animation.
pub trait PositionSink {
    /// The marker moved to `position`.
    fn marker_moved(&mut self, position: GeoPoint);

    /// The marker reached the end of the route at `position`.
    fn arrived(&mut self, position: GeoPoint) {
        self.marker_moved(position);
    }
}

impl PositionSink for Vec<GeoPoint> {
    fn marker_moved(&mut self, position: GeoPoint) {
        self.push(position);
    }
}
