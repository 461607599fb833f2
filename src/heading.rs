//! Compass bearing between consecutive route points and its 8-way
//! cardinal quantization.

use std::fmt;

use geo::Point;

use crate::error::{Error, Result};

/// Initial great-circle bearing at `from` toward `to`, in degrees clockwise
/// from north, normalized to `[0, 360)`.
pub fn bearing(from: Point<f64>, to: Point<f64>) -> Result<f64> {
    if [from.x(), from.y(), to.x(), to.y()]
        .iter()
        .any(|c| !c.is_finite())
    {
        return Err(Error::InvalidInput(format!(
            "non-finite coordinates in bearing: ({}, {}) -> ({}, {})",
            from.y(),
            from.x(),
            to.y(),
            to.x()
        )));
    }

    let lat1 = from.y().to_radians();
    let lat2 = to.y().to_radians();
    let d_lon = (to.x() - from.x()).to_radians();

    let x = d_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    Ok((x.atan2(y).to_degrees() + 360.0) % 360.0)
}

/// One of the eight compass points, each owning a 45 degree sector centered
/// on its exact bearing (N = 0, NE = 45, ... NW = 315).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardinalLabel {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CardinalLabel {
    pub const ALL: [CardinalLabel; 8] = [
        CardinalLabel::N,
        CardinalLabel::NE,
        CardinalLabel::E,
        CardinalLabel::SE,
        CardinalLabel::S,
        CardinalLabel::SW,
        CardinalLabel::W,
        CardinalLabel::NW,
    ];

    /// Quantize a heading into its compass sector. A bearing exactly on a
    /// sector boundary (22.5, 67.5, ...) rounds into the next sector.
    /// Headings outside `[0, 360)` are normalized first, so the mapping is
    /// total over all finite inputs.
    pub fn from_heading(heading: f64) -> Self {
        let normalized = heading.rem_euclid(360.0);
        let sector = ((normalized + 22.5) % 360.0 / 45.0) as usize;
        Self::ALL[sector.min(7)]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardinalLabel::N => "N",
            CardinalLabel::NE => "NE",
            CardinalLabel::E => "E",
            CardinalLabel::SE => "SE",
            CardinalLabel::S => "S",
            CardinalLabel::SW => "SW",
            CardinalLabel::W => "W",
            CardinalLabel::NW => "NW",
        }
    }
}

impl fmt::Display for CardinalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
