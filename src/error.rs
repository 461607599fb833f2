//! Error taxonomy for the route imagery pipeline.
//!
//! Structural and configuration errors abort the pipeline; per-chunk snap
//! failures are handled locally in [`crate::snapper`] and surface as dropped
//! chunk indices rather than as values of [`Error`].

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The encoded polyline could not be decoded.
    #[error("malformed encoded polyline: {0}")]
    Decode(String),

    /// A configuration value is out of range (non-positive interval,
    /// zero or over-cap snap batch size).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The directions provider found no route between the endpoints.
    #[error("no route found between origin and destination")]
    NoRoute,

    /// Non-finite coordinates were passed into the geometry math.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("http request failed")]
    Http(#[from] reqwest::Error),

    #[error("i/o error")]
    Io(#[from] std::io::Error),
}
