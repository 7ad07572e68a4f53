//! Error types for geometry decoding and route fetching.

use thiserror::Error;

/// Errors from decoding an encoded polyline string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The input ended in the middle of a variable-length integer.
    #[error("polyline ended mid-value at byte {offset}")]
    UnexpectedEnd { offset: usize },

    /// A byte outside the printable range the encoding produces.
    #[error("invalid polyline byte {byte:#04x} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    /// A single value used more 5-bit groups than fit in 64 bits.
    #[error("polyline value starting near byte {offset} overflows")]
    Overflow { offset: usize },
}

/// Failure of a single routing request.
///
/// These never leave the fetcher: each one downgrades the attempt that
/// produced it to "no routes" and is recorded in the diagnostic log.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or unreadable body.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// Non-JSON body, or JSON without a usable `routes` collection.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A well-formed response whose `routes` collection is empty.
    #[error("no routes found")]
    NoRoutesFound,

    /// Geometry was present but could not be decoded.
    #[error("geometry decode failure: {0}")]
    DecodeFailure(#[from] PolylineError),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::NetworkFailure(err.to_string())
    }
}
