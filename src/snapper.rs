//! Snapping sampled route points onto the road network.
//!
//! The external service accepts at most [`MAX_SNAP_BATCH`] points per
//! lookup, so the route is partitioned into consecutive chunks and each
//! chunk is resolved with one sequential call. A chunk whose response is
//! malformed (or whose request fails) contributes zero points: the chunk
//! index is recorded, a warning is logged, and the remaining chunks keep
//! processing. Losing a few meters of coverage beats aborting a
//! multi-request job.

use geo::Point;
use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::error::{Error, Result};

/// Hard cap the Roads API places on points per snap request.
pub const MAX_SNAP_BATCH: usize = 100;

const SNAP_TO_ROADS_URL: &str = "https://roads.googleapis.com/v1/snapToRoads";

/// Per-chunk snap failure. Recovered locally by [`snap_route`], never
/// propagated as a pipeline error.
#[derive(Debug, Error)]
pub enum SnapError {
    /// The response parsed but carried no snapped-point data.
    #[error("response contains no snapped points")]
    MissingSnappedPoints,

    /// The response body was not the expected JSON shape.
    #[error("malformed snap response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("snap request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Resolves one chunk of raw coordinates to their nearest on-road points,
/// preserving order. Implemented over HTTP by [`GoogleRoads`] and by stubs
/// in tests.
pub trait SnapService {
    async fn snap(
        &self,
        points: &[Point<f64>],
    ) -> std::result::Result<Vec<Point<f64>>, SnapError>;
}

/// Result of snapping a route: the surviving points in travel order plus
/// the 0-based indices of chunks that were dropped.
#[derive(Debug, Clone, Default)]
pub struct SnappedRoute {
    pub points: Vec<Point<f64>>,
    pub dropped_chunks: Vec<usize>,
}

impl SnappedRoute {
    /// True when every chunk contributed its points.
    pub fn is_complete(&self) -> bool {
        self.dropped_chunks.is_empty()
    }
}

/// Snap `route` through `service` in sequential chunks of at most
/// `batch_size` points. Output order is the concatenation of chunk results
/// in input order.
pub async fn snap_route<S: SnapService>(
    service: &S,
    route: &[Point<f64>],
    batch_size: usize,
) -> Result<SnappedRoute> {
    if batch_size == 0 || batch_size > MAX_SNAP_BATCH {
        return Err(Error::InvalidConfig(format!(
            "snap batch size must be between 1 and {MAX_SNAP_BATCH}, got {batch_size}"
        )));
    }

    let mut snapped = SnappedRoute::default();
    for (chunk_index, chunk) in route.chunks(batch_size).enumerate() {
        match service.snap(chunk).await {
            Ok(points) => snapped.points.extend(points),
            Err(e) => {
                warn!(
                    "Dropping snap chunk {chunk_index} ({} points): {e}",
                    chunk.len()
                );
                snapped.dropped_chunks.push(chunk_index);
            }
        }
    }

    Ok(snapped)
}

/// Google Roads `snapToRoads` client.
#[derive(Debug, Clone)]
pub struct GoogleRoads {
    client: reqwest::Client,
    api_key: String,
}

impl GoogleRoads {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

impl SnapService for GoogleRoads {
    async fn snap(
        &self,
        points: &[Point<f64>],
    ) -> std::result::Result<Vec<Point<f64>>, SnapError> {
        let path = points
            .iter()
            .map(|p| format!("{},{}", p.y(), p.x()))
            .collect::<Vec<_>>()
            .join("|");

        let body = self
            .client
            .get(SNAP_TO_ROADS_URL)
            .query(&[("path", path.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        parse_snap_response(&body)
    }
}

/// Parse a `snapToRoads` response body into on-road points, in response
/// order.
fn parse_snap_response(body: &[u8]) -> std::result::Result<Vec<Point<f64>>, SnapError> {
    let response: SnapResponse = serde_json::from_slice(body)?;
    let snapped = response
        .snapped_points
        .ok_or(SnapError::MissingSnappedPoints)?;

    Ok(snapped
        .into_iter()
        .map(|p| Point::new(p.location.longitude, p.location.latitude))
        .collect())
}

#[derive(Debug, Deserialize)]
struct SnapResponse {
    #[serde(rename = "snappedPoints")]
    snapped_points: Option<Vec<SnappedPoint>>,
}

#[derive(Debug, Deserialize)]
struct SnappedPoint {
    location: SnapLocation,
}

#[derive(Debug, Deserialize)]
struct SnapLocation {
    latitude: f64,
    longitude: f64,
}
