//! Core domain models for scheduled-flight density estimation.
//!
//! This module defines the schedule and airport data structures every query
//! runs against. Both tables are built once at load time and are read-only
//! afterwards.

pub mod airports;
pub mod domain;
pub mod schedule;

pub use airports::AirportDirectory;
pub use domain::{AirportRecord, Coordinate, ScheduleLeg, TimeOfDay, ValidityWindow};
pub use schedule::ScheduleTable;
