//! End-to-end route imagery pipeline.
//!
//! Fetches a route, decodes it, densifies it to the sampling interval, snaps
//! it onto the road network, then walks consecutive point pairs computing the
//! travel heading and downloading the per-point imagery. Stages run strictly
//! in sequence; each consumes the previous stage's route and produces a new
//! one.

use geo::Point;
use indicatif::ProgressBar;
use log::{info, warn};

use crate::directions::{DirectionsProvider, TravelMode};
use crate::error::Result;
use crate::heading::{self, CardinalLabel};
use crate::imagery::{ImageryProvider, MapLayer, MapType};
use crate::output::OutputLayout;
use crate::snapper::{self, SnapService};
use crate::{polyline, sampler};

/// Route processing configuration. Image size and field of view are
/// properties of the imagery client, not of the route.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Distance between consecutive samples along the route (meters)
    pub interval_meters: f64,
    /// Maximum points per snap-to-roads request
    pub snap_batch_size: usize,
    /// Overhead map layers, one output directory each
    pub map_layers: Vec<MapLayer>,
    /// Travel mode for the directions request
    pub travel_mode: TravelMode,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            interval_meters: 5.0,
            snap_batch_size: snapper::MAX_SNAP_BATCH,
            map_layers: vec![
                MapLayer {
                    zoom: 19,
                    map_type: MapType::Satellite,
                },
                MapLayer {
                    zoom: 13,
                    map_type: MapType::Hybrid,
                },
            ],
            travel_mode: TravelMode::Driving,
        }
    }
}

/// What a pipeline run produced, for the caller's completeness check.
#[derive(Debug, Clone)]
pub struct RouteSummary {
    /// Points in the final snapped route.
    pub point_count: usize,
    /// Street-level photos written to disk.
    pub street_views_saved: usize,
    /// Overhead maps written to disk, across all layers.
    pub maps_saved: usize,
    /// 0-based indices of snap chunks that contributed no points.
    pub dropped_chunks: Vec<usize>,
}

/// Drives the four pipeline stages against the configured collaborators.
pub struct RouteProcessor<D, S, I> {
    config: RouteConfig,
    directions: D,
    snapper: S,
    imagery: I,
    layout: OutputLayout,
}

impl<D, S, I> RouteProcessor<D, S, I>
where
    D: DirectionsProvider,
    S: SnapService,
    I: ImageryProvider,
{
    pub fn new(
        config: RouteConfig,
        directions: D,
        snapper: S,
        imagery: I,
        layout: OutputLayout,
    ) -> Self {
        Self {
            config,
            directions,
            snapper,
            imagery,
            layout,
        }
    }

    /// Process a whole route and download imagery for every point.
    pub async fn process(&self, origin: &str, destination: &str) -> Result<RouteSummary> {
        let encoded = self
            .directions
            .overview_polyline(origin, destination, self.config.travel_mode)
            .await?;
        let decoded = polyline::decode(&encoded)?;
        info!("Decoded route with {} points", decoded.len());

        let sampled = sampler::densify(&decoded, self.config.interval_meters)?;
        info!(
            "Densified to {} samples at {}m intervals",
            sampled.len(),
            self.config.interval_meters
        );

        let snapped =
            snapper::snap_route(&self.snapper, &sampled, self.config.snap_batch_size).await?;
        info!("Snapped route has {} points", snapped.points.len());
        if !snapped.is_complete() {
            warn!(
                "Route coverage incomplete: snap chunks {:?} contributed no points",
                snapped.dropped_chunks
            );
        }

        self.layout.prepare().await?;

        let mut summary = RouteSummary {
            point_count: snapped.points.len(),
            street_views_saved: 0,
            maps_saved: 0,
            dropped_chunks: snapped.dropped_chunks.clone(),
        };

        let progress = ProgressBar::new(snapped.points.len().saturating_sub(1) as u64);
        for (i, pair) in snapped.points.windows(2).enumerate() {
            let heading = heading::bearing(pair[0], pair[1])?;
            self.fetch_point(pair[0], heading, i + 1, &mut summary).await?;
            progress.inc(1);
        }
        progress.finish();

        Ok(summary)
    }

    /// Download and store every image for one point. `index` is 1-based and
    /// matches the point's position in the final route.
    async fn fetch_point(
        &self,
        point: Point<f64>,
        heading: f64,
        index: usize,
        summary: &mut RouteSummary,
    ) -> Result<()> {
        if let Some(bytes) = self.imagery.street_view(point, heading).await? {
            self.layout
                .write(&self.layout.street_view_path(index), &bytes)
                .await?;
            summary.street_views_saved += 1;
        }

        let label = CardinalLabel::from_heading(heading);
        for (layer_index, layer) in self.config.map_layers.iter().enumerate() {
            if let Some(bytes) = self.imagery.static_map(point, *layer, label).await? {
                self.layout
                    .write(&self.layout.map_path(layer_index, index), &bytes)
                    .await?;
                summary.maps_saved += 1;
            }
        }

        Ok(())
    }
}
