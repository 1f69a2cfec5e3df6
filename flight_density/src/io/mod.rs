//! High-level data loading utilities.
//!
//! Combines the schedule and airport parsers into a ready-to-query
//! [`FlightDataset`]. The airport directory is restricted to the codes the
//! loaded schedule actually references.
//!
//! # Example
//!
//! ```no_run
//! use flight_density::config::DensityConfig;
//! use flight_density::io::DatasetLoader;
//! use std::path::Path;
//!
//! let config = DensityConfig::default();
//! let dataset = DatasetLoader::load(Path::new("OAG.csv"), Path::new("airports.csv"), &config)
//!     .expect("Failed to load");
//! println!("Loaded {} legs", dataset.schedule.len());
//! ```

pub mod loaders;

pub use loaders::{DatasetLoader, FlightDataset};
