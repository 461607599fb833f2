//! End-to-end pipeline tests with stubbed collaborators

use std::path::PathBuf;
use std::sync::Mutex;

use geo::Point;
use streetlapse::directions::{DirectionsProvider, TravelMode};
use streetlapse::heading::CardinalLabel;
use streetlapse::imagery::{ImageryProvider, MapLayer};
use streetlapse::snapper::{SnapError, SnapService};
use streetlapse::{
    Error, OutputLayout, Result, RouteConfig, RouteProcessor, polyline, sampler,
};

struct FixedRoute(String);

impl DirectionsProvider for FixedRoute {
    async fn overview_polyline(
        &self,
        _origin: &str,
        _destination: &str,
        _mode: TravelMode,
    ) -> Result<String> {
        Ok(self.0.clone())
    }
}

struct NoRouteProvider;

impl DirectionsProvider for NoRouteProvider {
    async fn overview_polyline(
        &self,
        _origin: &str,
        _destination: &str,
        _mode: TravelMode,
    ) -> Result<String> {
        Err(Error::NoRoute)
    }
}

struct IdentitySnapper;

impl SnapService for IdentitySnapper {
    async fn snap(&self, points: &[Point<f64>]) -> std::result::Result<Vec<Point<f64>>, SnapError> {
        Ok(points.to_vec())
    }
}

/// Counts fetches without touching the network or producing bytes.
/// Implemented on the reference so tests keep access to the counters after
/// handing it to the processor.
#[derive(Default)]
struct NullImagery {
    street_views: Mutex<usize>,
    maps: Mutex<usize>,
}

impl ImageryProvider for &NullImagery {
    async fn street_view(&self, _point: Point<f64>, heading: f64) -> Result<Option<Vec<u8>>> {
        assert!((0.0..360.0).contains(&heading));
        *self.street_views.lock().unwrap() += 1;
        Ok(None)
    }

    async fn static_map(
        &self,
        _point: Point<f64>,
        _layer: MapLayer,
        _label: CardinalLabel,
    ) -> Result<Option<Vec<u8>>> {
        *self.maps.lock().unwrap() += 1;
        Ok(None)
    }
}

fn temp_output(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("streetlapse-test-{tag}-{}", std::process::id()))
}

fn fixture_route() -> Vec<Point<f64>> {
    // ~45m northward run in San Francisco
    vec![
        Point::new(-122.4218, 37.7792),
        Point::new(-122.4218, 37.7796),
    ]
}

#[tokio::test]
async fn test_process_fetches_one_image_set_per_segment() {
    let route = fixture_route();
    let config = RouteConfig {
        interval_meters: 10.0,
        ..RouteConfig::default()
    };
    let expected_points = sampler::densify(&route, config.interval_meters).unwrap().len();
    let map_layers = config.map_layers.len();

    let output = temp_output("fetch");
    let imagery = NullImagery::default();
    let processor = RouteProcessor::new(
        config,
        FixedRoute(polyline::encode(&route)),
        IdentitySnapper,
        &imagery,
        OutputLayout::new(&output, map_layers),
    );

    let summary = processor.process("origin", "destination").await.unwrap();

    assert_eq!(summary.point_count, expected_points);
    assert!(summary.dropped_chunks.is_empty());

    // One street view and one map per layer for each consecutive pair
    let segments = expected_points - 1;
    assert_eq!(*imagery.street_views.lock().unwrap(), segments);
    assert_eq!(*imagery.maps.lock().unwrap(), segments * map_layers);

    // The imagery stub returned no bytes, so nothing was saved
    assert_eq!(summary.street_views_saved, 0);
    assert_eq!(summary.maps_saved, 0);

    let _ = std::fs::remove_dir_all(&output);
}

#[tokio::test]
async fn test_process_prepares_output_directories() {
    let route = fixture_route();
    let output = temp_output("layout");
    let imagery = NullImagery::default();
    let processor = RouteProcessor::new(
        RouteConfig {
            interval_meters: 10.0,
            ..RouteConfig::default()
        },
        FixedRoute(polyline::encode(&route)),
        IdentitySnapper,
        &imagery,
        OutputLayout::new(&output, 2),
    );

    processor.process("origin", "destination").await.unwrap();

    assert!(output.join("raw").is_dir());
    assert!(output.join("maps1").is_dir());
    assert!(output.join("maps2").is_dir());

    let _ = std::fs::remove_dir_all(&output);
}

#[tokio::test]
async fn test_no_route_propagates() {
    let output = temp_output("noroute");
    let imagery = NullImagery::default();
    let processor = RouteProcessor::new(
        RouteConfig::default(),
        NoRouteProvider,
        IdentitySnapper,
        &imagery,
        OutputLayout::new(&output, 2),
    );

    let err = processor.process("origin", "destination").await.unwrap_err();
    assert!(matches!(err, Error::NoRoute));
    // Fail-fast: no output directories were created, nothing was fetched
    assert!(!output.exists());
    assert_eq!(*imagery.street_views.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_interval_aborts_before_snapping() {
    let output = temp_output("badinterval");
    let imagery = NullImagery::default();
    let processor = RouteProcessor::new(
        RouteConfig {
            interval_meters: -1.0,
            ..RouteConfig::default()
        },
        FixedRoute(polyline::encode(&fixture_route())),
        IdentitySnapper,
        &imagery,
        OutputLayout::new(&output, 2),
    );

    let err = processor.process("origin", "destination").await.unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert!(!output.exists());
}
