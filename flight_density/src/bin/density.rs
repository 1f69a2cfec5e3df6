//! Flight density CLI
//!
//! Loads a flight schedule and an airport table, then counts the aircraft
//! estimated within the configured radius of a point at a local instant.
//! Load and query times are logged so the scan cost can be checked against
//! real schedule sizes.
//!
//! # Usage
//!
//! ```bash
//! flight-density data/OAG.csv data/airports.csv "2024-04-10 11:00" 30.87 133.71
//!
//! # JSON report on stdout
//! flight-density data/OAG.csv data/airports.csv 2024-04-10T11:00 30.87 133.71 --json
//! ```
//!
//! # Environment Variables
//!
//! - `DENSITY_CONFIG`: Path to a TOML config file (default: `density.toml` if present)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use flight_density::core::domain::{parse_query_instant, Coordinate};
use flight_density::{DatasetLoader, DensityConfig};

const USAGE: &str =
    "usage: flight-density <schedule.csv> <airports.csv> <instant> <latitude> <longitude> [--json]";

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let positional: Vec<&str> = args
        .iter()
        .filter(|a| a.as_str() != "--json")
        .map(|a| a.as_str())
        .collect();

    let &[schedule_path, airports_path, instant, latitude, longitude] = positional.as_slice() else {
        anyhow::bail!(USAGE);
    };

    let instant = parse_query_instant(instant)
        .with_context(|| format!("Invalid instant '{}', expected YYYY-MM-DD HH:MM", instant))?;
    let latitude: f64 = latitude
        .parse()
        .with_context(|| format!("Invalid latitude '{}'", latitude))?;
    let longitude: f64 = longitude
        .parse()
        .with_context(|| format!("Invalid longitude '{}'", longitude))?;

    let config = match env::var("DENSITY_CONFIG") {
        Ok(path) => DensityConfig::from_file(&path)?,
        Err(_) => DensityConfig::from_default_location()?,
    };

    let start = Instant::now();
    let dataset = DatasetLoader::load(Path::new(schedule_path), Path::new(airports_path), &config)?;
    info!(
        legs = dataset.schedule.len(),
        airports = dataset.airports.len(),
        "Loaded dataset in {:.3} seconds",
        start.elapsed().as_secs_f64()
    );

    let query = dataset.density_query(config.query);
    let start = Instant::now();
    let report = query.report(instant, Coordinate::new(latitude, longitude));
    info!(
        "Scanned {} legs in {:.3} seconds",
        report.legs_scanned,
        start.elapsed().as_secs_f64()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.count);
    }

    Ok(())
}
