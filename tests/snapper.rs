//! Tests for chunked road snapping and its degrade-but-continue policy

use std::sync::Mutex;

use geo::Point;
use streetlapse::Error;
use streetlapse::snapper::{SnapError, SnapService, snap_route};

/// Echoes each chunk back, recording chunk sizes, and fails the chunks whose
/// indices are listed in `fail_chunks` with a malformed-shape error.
struct RecordingSnapper {
    chunk_sizes: Mutex<Vec<usize>>,
    fail_chunks: Vec<usize>,
}

impl RecordingSnapper {
    fn new(fail_chunks: Vec<usize>) -> Self {
        Self {
            chunk_sizes: Mutex::new(Vec::new()),
            fail_chunks,
        }
    }

    fn sizes(&self) -> Vec<usize> {
        self.chunk_sizes.lock().unwrap().clone()
    }
}

impl SnapService for RecordingSnapper {
    async fn snap(&self, points: &[Point<f64>]) -> Result<Vec<Point<f64>>, SnapError> {
        let index = {
            let mut sizes = self.chunk_sizes.lock().unwrap();
            sizes.push(points.len());
            sizes.len() - 1
        };
        if self.fail_chunks.contains(&index) {
            return Err(SnapError::MissingSnappedPoints);
        }
        Ok(points.to_vec())
    }
}

fn numbered_points(count: usize) -> Vec<Point<f64>> {
    (0..count).map(|i| Point::new(i as f64 * 1e-4, 0.0)).collect()
}

#[tokio::test]
async fn test_250_points_batch_100_issues_three_lookups() {
    let snapper = RecordingSnapper::new(vec![]);
    let route = numbered_points(250);

    let snapped = snap_route(&snapper, &route, 100).await.unwrap();

    assert_eq!(snapper.sizes(), vec![100, 100, 50]);
    assert_eq!(snapped.points.len(), 250);
    assert!(snapped.is_complete());
}

#[tokio::test]
async fn test_exact_batch_is_one_lookup() {
    let snapper = RecordingSnapper::new(vec![]);
    let route = numbered_points(100);

    let snapped = snap_route(&snapper, &route, 100).await.unwrap();

    assert_eq!(snapper.sizes(), vec![100]);
    assert_eq!(snapped.points.len(), 100);
}

#[tokio::test]
async fn test_malformed_chunk_dropped_and_reported() {
    let snapper = RecordingSnapper::new(vec![1]);
    let route = numbered_points(250);

    let snapped = snap_route(&snapper, &route, 100).await.unwrap();

    // Middle chunk contributes nothing; neighbors stay intact and ordered
    assert_eq!(snapped.dropped_chunks, vec![1]);
    assert_eq!(snapped.points.len(), 150);
    assert_eq!(snapped.points[..100], route[..100]);
    assert_eq!(snapped.points[100..], route[200..]);
    assert!(!snapped.is_complete());
}

#[tokio::test]
async fn test_all_chunks_failing_yields_empty_route() {
    let snapper = RecordingSnapper::new(vec![0, 1, 2]);
    let route = numbered_points(250);

    let snapped = snap_route(&snapper, &route, 100).await.unwrap();

    assert!(snapped.points.is_empty());
    assert_eq!(snapped.dropped_chunks, vec![0, 1, 2]);
}

#[tokio::test]
async fn test_order_preserved_across_chunks() {
    let snapper = RecordingSnapper::new(vec![]);
    let route = numbered_points(7);

    let snapped = snap_route(&snapper, &route, 3).await.unwrap();

    assert_eq!(snapper.sizes(), vec![3, 3, 1]);
    assert_eq!(snapped.points, route);
}

#[tokio::test]
async fn test_invalid_batch_sizes_rejected_before_any_lookup() {
    let snapper = RecordingSnapper::new(vec![]);
    let route = numbered_points(10);

    for batch in [0, 101] {
        let err = snap_route(&snapper, &route, batch).await.unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
    assert!(snapper.sizes().is_empty());
}
