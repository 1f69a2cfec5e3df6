//! Parsers for flight schedule and airport data files.
//!
//! Both sources are CSV files read through Polars, pruned to the columns the
//! estimator needs and then converted into typed records.
//!
//! # Parsers
//!
//! - [`schedule_csv`]: Parse the flight schedule, keeping domestic legs only
//! - [`airports_csv`]: Parse the airport table into raw records
//!
//! # Example
//!
//! ```no_run
//! use flight_density::parsing::schedule_csv::parse_schedule_csv_to_legs;
//! use std::path::Path;
//!
//! let legs = parse_schedule_csv_to_legs(Path::new("OAG.csv"), "Domestic")
//!     .expect("Failed to parse schedule");
//! ```

pub mod airports_csv;
pub mod schedule_csv;

#[cfg(test)]
mod schedule_csv_tests;

pub use airports_csv::parse_airports_csv_to_records;
pub use schedule_csv::parse_schedule_csv_to_legs;
