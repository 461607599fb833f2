//! Interval densification of a route.
//!
//! Walks a route pairwise and inserts evenly spaced points so no two
//! consecutive samples are farther apart than the configured interval.
//! Interpolation is linear in latitude and longitude independently; over the
//! few-meter spans this runs at, the deviation from the true great-circle
//! path is negligible and accepted.

use geo::{Distance as _, Haversine, Point};

use crate::error::{Error, Result};

/// Densify `route` so consecutive points are at most `interval_m` meters
/// apart (great-circle distance).
///
/// For each consecutive pair (A, B): if the distance is under the interval,
/// B is emitted as-is. Otherwise `k = ceil(distance / interval_m)` points are
/// emitted at fractions 1/k .. k/k of the segment, so every sub-segment
/// measures `distance / k <= interval_m`. The first and last input points are
/// always present in the output unchanged; a single-point route is returned
/// as-is.
pub fn densify(route: &[Point<f64>], interval_m: f64) -> Result<Vec<Point<f64>>> {
    if !interval_m.is_finite() || interval_m <= 0.0 {
        return Err(Error::InvalidConfig(format!(
            "sampling interval must be a positive number of meters, got {interval_m}"
        )));
    }
    let Some(first) = route.first() else {
        return Err(Error::InvalidInput("cannot densify an empty route".to_string()));
    };

    let mut sampled = vec![*first];
    for pair in route.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let distance = Haversine.distance(a, b);

        if distance < interval_m {
            sampled.push(b);
            continue;
        }

        let subdivisions = (distance / interval_m).ceil() as usize;
        for i in 1..subdivisions {
            let t = i as f64 / subdivisions as f64;
            sampled.push(Point::new(
                a.x() + (b.x() - a.x()) * t,
                a.y() + (b.y() - a.y()) * t,
            ));
        }
        // Emit B itself rather than the t = 1.0 interpolant so the segment
        // endpoint survives float rounding exactly.
        sampled.push(b);
    }

    Ok(sampled)
}
