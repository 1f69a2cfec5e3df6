//! Density query configuration file support.
//!
//! Settings are read from a TOML file. Every field has a default, so an empty
//! file (or no file at all) yields the standard 10 minute margin and 10 km
//! radius.
//!
//! ```toml
//! [query]
//! margin_minutes = 10.0
//! radius_km = 10.0
//!
//! [airports]
//! country = "JP"
//! excluded_types = ["heliport", "closed"]
//! excluded_names = []
//!
//! [schedule]
//! domestic_flag = "Domestic"
//! ```

use chrono::TimeDelta;
use qtty::{Kilometers, Minutes};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DensityError, DensityResult};

/// Complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DensityConfig {
    #[serde(default)]
    pub query: QuerySettings,
    #[serde(default)]
    pub airports: AirportSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

/// Position and density query settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Ground buffer removed from both ends of the scheduled window.
    #[serde(default = "default_margin")]
    pub margin_minutes: Minutes,
    /// Radius around the query point within which aircraft are counted.
    #[serde(default = "default_radius")]
    pub radius_km: Kilometers,
}

/// Airport source filter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportSettings {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_excluded_types")]
    pub excluded_types: Vec<String>,
    /// Airport names dropped from the source, for known erroneous or
    /// duplicate entries.
    #[serde(default)]
    pub excluded_names: Vec<String>,
}

/// Schedule source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// Value of the `International/Domestic` column that marks a domestic route.
    #[serde(default = "default_domestic_flag")]
    pub domestic_flag: String,
}

fn default_margin() -> Minutes {
    Minutes::new(10.0)
}

fn default_radius() -> Kilometers {
    Kilometers::new(10.0)
}

fn default_country() -> String {
    "JP".to_string()
}

fn default_excluded_types() -> Vec<String> {
    vec!["heliport".to_string(), "closed".to_string()]
}

fn default_domestic_flag() -> String {
    "Domestic".to_string()
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            margin_minutes: default_margin(),
            radius_km: default_radius(),
        }
    }
}

impl Default for AirportSettings {
    fn default() -> Self {
        Self {
            country: default_country(),
            excluded_types: default_excluded_types(),
            excluded_names: Vec::new(),
        }
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            domestic_flag: default_domestic_flag(),
        }
    }
}

impl QuerySettings {
    /// Query settings with validated margin and radius.
    pub fn new(margin_minutes: f64, radius_km: f64) -> DensityResult<Self> {
        let settings = Self {
            margin_minutes: Minutes::new(margin_minutes),
            radius_km: Kilometers::new(radius_km),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Margin as a chrono duration, rounded to the millisecond.
    pub fn margin(&self) -> TimeDelta {
        TimeDelta::milliseconds((self.margin_minutes.value() * 60_000.0).round() as i64)
    }

    fn validate(&self) -> DensityResult<()> {
        let margin = self.margin_minutes.value();
        if !margin.is_finite() || margin < 0.0 {
            return Err(DensityError::ConfigurationError(format!(
                "query.margin_minutes must be a non-negative number, got {}",
                margin
            )));
        }
        let radius = self.radius_km.value();
        if !radius.is_finite() || radius < 0.0 {
            return Err(DensityError::ConfigurationError(format!(
                "query.radius_km must be a non-negative number, got {}",
                radius
            )));
        }
        Ok(())
    }
}

impl DensityConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> DensityResult<Self> {
        let config: DensityConfig = toml::from_str(content).map_err(|e| {
            DensityError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DensityResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            DensityError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the first `density.toml` found in:
    /// 1. Current directory
    /// 2. `flight_density/` directory
    /// 3. Parent directory
    ///
    /// Falls back to defaults when no file exists.
    pub fn from_default_location() -> DensityResult<Self> {
        let search_paths = [
            PathBuf::from("density.toml"),
            PathBuf::from("flight_density/density.toml"),
            PathBuf::from("../density.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading density configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::debug!("No density.toml found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> DensityResult<()> {
        self.query.validate()?;
        if self.airports.country.trim().is_empty() {
            return Err(DensityError::ConfigurationError(
                "airports.country must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
