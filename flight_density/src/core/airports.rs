//! Airport directory for IATA code lookup.

use std::collections::{HashMap, HashSet};

use super::domain::{AirportRecord, Coordinate};
use crate::config::AirportSettings;
use crate::error::{DensityError, DensityResult};

/// Index of airport coordinates keyed by IATA code.
///
/// Built once from the raw airport source and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: HashMap<String, Coordinate>,
}

impl AirportDirectory {
    /// Build a directory from raw airport records.
    ///
    /// A record is kept when it is in the configured country, its type is not
    /// excluded, its name is not excluded, and it has an IATA code, a latitude
    /// and a longitude. Only codes present in `codes_of_interest` are indexed.
    /// If two kept records share a code, the first one wins.
    ///
    /// Fails with [`DensityError::EmptyAirportTable`] when `records` is empty
    /// or no record passes the source filter.
    pub fn build(
        records: &[AirportRecord],
        codes_of_interest: &HashSet<String>,
        settings: &AirportSettings,
    ) -> DensityResult<Self> {
        if records.is_empty() {
            return Err(DensityError::EmptyAirportTable);
        }

        let mut airports = HashMap::new();
        let mut usable = 0usize;
        let mut duplicates = 0usize;

        for record in records {
            let Some((code, coordinate)) = Self::accept(record, settings) else {
                continue;
            };
            usable += 1;
            if !codes_of_interest.contains(code) {
                continue;
            }
            if airports.contains_key(code) {
                duplicates += 1;
                continue;
            }
            airports.insert(code.to_string(), coordinate);
        }

        if usable == 0 {
            return Err(DensityError::EmptyAirportTable);
        }

        if duplicates > 0 {
            log::warn!(
                "Ignored {} duplicate airport entries sharing an IATA code",
                duplicates
            );
        }

        let missing = codes_of_interest
            .iter()
            .filter(|code| !airports.contains_key(code.as_str()))
            .count();
        if missing > 0 {
            log::warn!(
                "{} of {} scheduled airport codes have no coordinates; legs using them are skipped",
                missing,
                codes_of_interest.len()
            );
        }

        log::info!(
            "Built airport directory with {} airports from {} records",
            airports.len(),
            records.len()
        );

        Ok(Self { airports })
    }

    /// Apply the source filter to a single record.
    fn accept<'r>(
        record: &'r AirportRecord,
        settings: &AirportSettings,
    ) -> Option<(&'r str, Coordinate)> {
        if record.iso_country.as_deref() != Some(settings.country.as_str()) {
            return None;
        }
        if let Some(kind) = record.airport_type.as_deref() {
            if settings.excluded_types.iter().any(|t| t == kind) {
                return None;
            }
        }
        if let Some(name) = record.name.as_deref() {
            if settings.excluded_names.iter().any(|n| n == name) {
                return None;
            }
        }

        let code = record.iata_code.as_deref().map(str::trim)?;
        if code.is_empty() {
            return None;
        }
        let coordinate = Coordinate::new(record.latitude?, record.longitude?);
        if !coordinate.is_finite() {
            return None;
        }
        Some((code, coordinate))
    }

    /// Build a directory directly from code/coordinate pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinate)>,
        S: Into<String>,
    {
        Self {
            airports: entries
                .into_iter()
                .map(|(code, coordinate)| (code.into(), coordinate))
                .collect(),
        }
    }

    /// Coordinate of an airport, or [`DensityError::UnknownAirport`].
    pub fn lookup(&self, code: &str) -> DensityResult<Coordinate> {
        self.get(code)
            .ok_or_else(|| DensityError::UnknownAirport(code.to_string()))
    }

    pub fn get(&self, code: &str) -> Option<Coordinate> {
        self.airports.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.airports.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}
