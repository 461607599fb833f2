//! Fetching the overview route between two endpoints.

use serde::Deserialize;

use crate::error::{Error, Result};

const DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Travel mode passed through to the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

/// Returns the encoded overview polyline of a route between two endpoints.
/// Implemented over HTTP by [`GoogleDirections`] and by stubs in tests.
pub trait DirectionsProvider {
    async fn overview_polyline(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<String>;
}

/// Google Directions API client.
#[derive(Debug, Clone)]
pub struct GoogleDirections {
    client: reqwest::Client,
    api_key: String,
}

impl GoogleDirections {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
        }
    }
}

impl DirectionsProvider for GoogleDirections {
    async fn overview_polyline(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<String> {
        let response: DirectionsResponse = self
            .client
            .get(DIRECTIONS_URL)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", mode.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .routes
            .into_iter()
            .next()
            .map(|route| route.overview_polyline.points)
            .ok_or(Error::NoRoute)
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    overview_polyline: EncodedPolyline,
}

#[derive(Debug, Deserialize)]
struct EncodedPolyline {
    points: String,
}
