//! ecoroute core
//!
//! Fetches candidate routes between two points from an OSRM-style routing
//! service, normalizes them, and drives route selection and marker
//! animation for a presentation layer.

pub mod animation;
pub mod diagnostics;
pub mod emissions;
pub mod error;
pub mod fetcher;
pub mod geo;
pub mod osrm;
pub mod polyline;
pub mod response;
pub mod route;
pub mod selection;
pub mod session;
pub mod traits;
