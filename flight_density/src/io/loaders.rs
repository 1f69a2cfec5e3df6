use anyhow::{Context, Result};
use std::path::Path;

use crate::config::{DensityConfig, QuerySettings};
use crate::core::airports::AirportDirectory;
use crate::core::schedule::ScheduleTable;
use crate::parsing::{airports_csv, schedule_csv};
use crate::services::density::DensityQuery;

/// Loaded schedule and airport tables. Immutable once built.
#[derive(Debug, Clone)]
pub struct FlightDataset {
    pub schedule: ScheduleTable,
    pub airports: AirportDirectory,
}

impl FlightDataset {
    pub fn new(schedule: ScheduleTable, airports: AirportDirectory) -> Self {
        Self { schedule, airports }
    }

    /// Density query over this dataset.
    pub fn density_query(&self, settings: QuerySettings) -> DensityQuery<'_> {
        DensityQuery::new(&self.schedule, &self.airports, settings)
    }
}

/// Unified interface for loading schedule and airport files
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load the schedule CSV, then the airport CSV filtered to the codes the
    /// schedule references.
    pub fn load(schedule_path: &Path, airports_path: &Path, config: &DensityConfig) -> Result<FlightDataset> {
        let schedule = Self::load_schedule(schedule_path, config)?;
        let airports = Self::load_airports(airports_path, &schedule, config)?;
        Ok(FlightDataset::new(schedule, airports))
    }

    /// Load the domestic legs of a schedule CSV
    pub fn load_schedule(path: &Path, config: &DensityConfig) -> Result<ScheduleTable> {
        let legs = schedule_csv::parse_schedule_csv_to_legs(path, &config.schedule.domestic_flag)
            .with_context(|| format!("Failed to load schedule from {}", path.display()))?;
        Ok(ScheduleTable::new(legs))
    }

    /// Load the airport directory for the codes used by `schedule`
    pub fn load_airports(
        path: &Path,
        schedule: &ScheduleTable,
        config: &DensityConfig,
    ) -> Result<AirportDirectory> {
        let records = airports_csv::parse_airports_csv_to_records(path)
            .with_context(|| format!("Failed to load airports from {}", path.display()))?;

        let directory = AirportDirectory::build(&records, &schedule.airport_codes(), &config.airports)
            .with_context(|| format!("Failed to build airport directory from {}", path.display()))?;

        Ok(directory)
    }
}
