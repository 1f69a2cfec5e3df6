//! Position estimation and density query services.
//!
//! - [`position`]: where a single leg's aircraft is at an instant
//! - [`density`]: how many aircraft are near a point at an instant
//! - [`geometry`]: flat distance and linear interpolation primitives

pub mod density;
pub mod geometry;
pub mod position;

pub use density::{AirbornePosition, DensityQuery, DensityReport};
pub use geometry::{distance, AirborneWindow, EARTH_RADIUS_KM};
pub use position::{FlightPositionEstimator, TrackSample};
