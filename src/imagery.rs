//! Street-level and overhead map imagery downloads.
//!
//! Thin wrappers over the Street View Static and Static Maps endpoints. A
//! non-success status skips the artifact with a warning rather than aborting
//! the run; one missing frame is not worth losing a long fetch job over.

use geo::Point;
use log::warn;

use crate::error::Result;
use crate::heading::CardinalLabel;

const STREET_VIEW_URL: &str = "https://maps.googleapis.com/maps/api/streetview";
const STATIC_MAP_URL: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Rendering style of an overhead map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapType {
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

impl MapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapType::Roadmap => "roadmap",
            MapType::Satellite => "satellite",
            MapType::Hybrid => "hybrid",
            MapType::Terrain => "terrain",
        }
    }
}

/// One overhead map output: a zoom level and map type, rendered into its own
/// directory per point.
#[derive(Debug, Clone, Copy)]
pub struct MapLayer {
    pub zoom: u8,
    pub map_type: MapType,
}

/// Fetches the per-point images. Implemented over HTTP by [`GoogleImagery`]
/// and by stubs in tests.
pub trait ImageryProvider {
    /// Street-level photo at `point` facing `heading`. `None` when the
    /// service reports a non-success status.
    async fn street_view(&self, point: Point<f64>, heading: f64) -> Result<Option<Vec<u8>>>;

    /// Overhead map centered on `point` with a red marker labeled with the
    /// travel direction. `None` when the service reports a non-success
    /// status.
    async fn static_map(
        &self,
        point: Point<f64>,
        layer: MapLayer,
        label: CardinalLabel,
    ) -> Result<Option<Vec<u8>>>;
}

/// Google Street View Static / Static Maps client.
#[derive(Debug, Clone)]
pub struct GoogleImagery {
    client: reqwest::Client,
    api_key: String,
    image_size: String,
    fov: u8,
}

impl GoogleImagery {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        image_size: impl Into<String>,
        fov: u8,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            image_size: image_size.into(),
            fov,
        }
    }
}

impl ImageryProvider for GoogleImagery {
    async fn street_view(&self, point: Point<f64>, heading: f64) -> Result<Option<Vec<u8>>> {
        let location = format!("{},{}", point.y(), point.x());
        let heading = format!("{heading}");
        let fov = self.fov.to_string();

        let response = self
            .client
            .get(STREET_VIEW_URL)
            .query(&[
                ("size", self.image_size.as_str()),
                ("location", location.as_str()),
                ("heading", heading.as_str()),
                ("fov", fov.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                "Street view fetch for {location} returned {}",
                response.status()
            );
            return Ok(None);
        }

        Ok(Some(response.bytes().await?.to_vec()))
    }

    async fn static_map(
        &self,
        point: Point<f64>,
        layer: MapLayer,
        label: CardinalLabel,
    ) -> Result<Option<Vec<u8>>> {
        let center = format!("{},{}", point.y(), point.x());
        let marker = format!("color:red|label:{label}|{center}");
        let zoom = layer.zoom.to_string();

        let response = self
            .client
            .get(STATIC_MAP_URL)
            .query(&[
                ("center", center.as_str()),
                ("maptype", layer.map_type.as_str()),
                ("zoom", zoom.as_str()),
                ("size", self.image_size.as_str()),
                ("markers", marker.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(
                "Static map fetch for {center} (zoom {}) returned {}",
                layer.zoom,
                response.status()
            );
            return Ok(None);
        }

        Ok(Some(response.bytes().await?.to_vec()))
    }
}
