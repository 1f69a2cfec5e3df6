//! Flight density - air-traffic density estimation from scheduled flights.
//!
//! Aircraft positions are estimated purely from the timetable: each domestic
//! leg is assumed to fly in a straight line between its airports during its
//! scheduled window, shortened by a ground margin at both ends. A density
//! query counts the legs whose estimated position lies within a radius of a
//! point at a given local instant.

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod services;

pub use crate::config::{DensityConfig, QuerySettings};
pub use crate::core::{AirportDirectory, Coordinate, ScheduleLeg, ScheduleTable};
pub use crate::error::{DensityError, DensityResult};
pub use crate::io::{DatasetLoader, FlightDataset};
pub use crate::services::{DensityQuery, FlightPositionEstimator};
