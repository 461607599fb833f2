//! # streetlapse
//!
//! Turns a driving route between two addresses into a dense, road-snapped
//! sequence of geographic points and downloads a street-level photo plus
//! direction-annotated overhead maps for each one.
//!
//! The pipeline has four stages, each consuming the previous stage's route:
//!
//! 1. **Decode** the route's encoded overview polyline ([`polyline`])
//! 2. **Densify** it to a fixed sampling interval ([`sampler`])
//! 3. **Snap** the samples onto the road network ([`snapper`])
//! 4. **Head** each consecutive pair with a compass bearing ([`heading`])
//!
//! The geometry stages are pure and need no network; the HTTP collaborators
//! (directions, snapping, imagery) sit behind traits so tests can substitute
//! stubs.
//!
//! ```rust
//! use streetlapse::{polyline, sampler, heading};
//!
//! let route = polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
//! assert_eq!(route.len(), 3);
//!
//! let dense = sampler::densify(&route, 50_000.0).unwrap();
//! let bearing = heading::bearing(dense[0], dense[1]).unwrap();
//! assert!((0.0..360.0).contains(&bearing));
//! ```

#![allow(async_fn_in_trait)]

pub mod directions;
pub mod error;
pub mod heading;
pub mod imagery;
pub mod output;
pub mod pipeline;
pub mod polyline;
pub mod sampler;
pub mod snapper;

pub use directions::{DirectionsProvider, GoogleDirections, TravelMode};
pub use error::{Error, Result};
pub use heading::CardinalLabel;
pub use imagery::{GoogleImagery, ImageryProvider, MapLayer, MapType};
pub use output::OutputLayout;
pub use pipeline::{RouteConfig, RouteProcessor, RouteSummary};
pub use snapper::{GoogleRoads, SnapError, SnapService, SnappedRoute, snap_route};
