//! Encoded polyline decoding and encoding.
//!
//! Implements the Google encoded polyline algorithm format: each coordinate
//! is delta-encoded from the previous one at 1e-5 degree precision, zig-zag
//! signed, and written as 5-bit chunks offset by 63 with a continuation bit.
//! Latitude comes before longitude in each pair.

use geo::Point;

use crate::error::{Error, Result};

/// Quantization step of the encoding, in degrees.
const PRECISION: f64 = 1e-5;

/// Chunk values are offset by 63 so they land in printable ASCII.
const CHAR_OFFSET: u8 = 63;

/// Set on every chunk except the last of a value.
const CONTINUATION_BIT: u64 = 0x20;

/// Decode an encoded polyline into an ordered route.
///
/// Points are returned as `geo::Point` with `x = longitude`, `y = latitude`,
/// in decimal degrees. An empty string is an error: a route always has at
/// least one point.
pub fn decode(encoded: &str) -> Result<Vec<Point<f64>>> {
    if encoded.is_empty() {
        return Err(Error::Decode("empty polyline".to_string()));
    }

    let bytes = encoded.as_bytes();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();

    while pos < bytes.len() {
        let (delta_lat, next) = decode_value(bytes, pos)?;
        if next >= bytes.len() {
            return Err(Error::Decode(
                "latitude delta without matching longitude".to_string(),
            ));
        }
        let (delta_lon, next) = decode_value(bytes, next)?;

        lat += delta_lat;
        lon += delta_lon;
        points.push(Point::new(lon as f64 * PRECISION, lat as f64 * PRECISION));
        pos = next;
    }

    Ok(points)
}

/// Encode a route into the polyline format. Exact inverse of [`decode`] at
/// 1e-5 degree quantization.
pub fn encode(points: &[Point<f64>]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in points {
        let lat = (point.y() / PRECISION).round() as i64;
        let lon = (point.x() / PRECISION).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

/// Decode one zig-zag signed value starting at `pos`, returning the value
/// and the position just past it.
fn decode_value(bytes: &[u8], mut pos: usize) -> Result<(i64, usize)> {
    let mut result: u64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(pos) else {
            return Err(Error::Decode("chunk sequence ends mid-value".to_string()));
        };
        if byte < CHAR_OFFSET {
            return Err(Error::Decode(format!(
                "invalid polyline character {:?} at offset {pos}",
                byte as char
            )));
        }
        if shift > 60 {
            return Err(Error::Decode(format!(
                "value overflows at offset {pos}"
            )));
        }

        let chunk = (byte - CHAR_OFFSET) as u64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        pos += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    // Undo the zig-zag: even values are positive, odd are negative.
    let value = if result & 1 != 0 {
        !(result >> 1) as i64
    } else {
        (result >> 1) as i64
    };

    Ok((value, pos))
}

fn encode_value(value: i64, out: &mut String) {
    let mut zigzag = ((value << 1) ^ (value >> 63)) as u64;

    while zigzag >= CONTINUATION_BIT {
        out.push(((zigzag & 0x1f | CONTINUATION_BIT) as u8 + CHAR_OFFSET) as char);
        zigzag >>= 5;
    }
    out.push((zigzag as u8 + CHAR_OFFSET) as char);
}
