use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::core::domain::{parse_schedule_date, ScheduleLeg, TimeOfDay, ValidityWindow};
use crate::error::DensityError;

pub const DOMESTIC_FLAG_COLUMN: &str = "International/Domestic";
pub const DEP_AIRPORT_COLUMN: &str = "Dep Airport Code";
pub const ARR_AIRPORT_COLUMN: &str = "Arr Airport Code";
pub const EFFECTIVE_FROM_COLUMN: &str = "Effective From";
pub const EFFECTIVE_TO_COLUMN: &str = "Effective To";
pub const DEP_TIME_COLUMN: &str = "Local Dep Time";
pub const ARR_TIME_COLUMN: &str = "Local Arr Time";
pub const FLYING_TIME_COLUMN: &str = "Flying Time";

const REQUIRED_COLUMNS: [&str; 7] = [
    DOMESTIC_FLAG_COLUMN,
    DEP_AIRPORT_COLUMN,
    ARR_AIRPORT_COLUMN,
    EFFECTIVE_FROM_COLUMN,
    EFFECTIVE_TO_COLUMN,
    DEP_TIME_COLUMN,
    ARR_TIME_COLUMN,
];

/// Parse a schedule CSV file into a pruned Polars DataFrame of domestic legs
pub fn parse_schedule_csv(csv_path: &Path, domestic_flag: &str) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()
        .context("Failed to parse schedule CSV into DataFrame")?;

    prune_schedule(df, domestic_flag)
}

/// Keep domestic rows and only the columns position estimation needs
pub fn prune_schedule(df: DataFrame, domestic_flag: &str) -> Result<DataFrame> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for required in REQUIRED_COLUMNS {
        if !column_names.iter().any(|c| c == required) {
            anyhow::bail!("Schedule CSV is missing column '{}'", required);
        }
    }

    // Flying time is carried for completeness; older extracts omit it
    let flying_time = if column_names.iter().any(|c| c == FLYING_TIME_COLUMN) {
        col(FLYING_TIME_COLUMN).cast(DataType::String)
    } else {
        lit(NULL).cast(DataType::String).alias(FLYING_TIME_COLUMN)
    };

    let df = df
        .lazy()
        .filter(
            col(DOMESTIC_FLAG_COLUMN)
                .cast(DataType::String)
                .eq(lit(domestic_flag)),
        )
        .select([
            col(DEP_AIRPORT_COLUMN).cast(DataType::String),
            col(ARR_AIRPORT_COLUMN).cast(DataType::String),
            col(EFFECTIVE_FROM_COLUMN).cast(DataType::String),
            col(EFFECTIVE_TO_COLUMN).cast(DataType::String),
            col(DEP_TIME_COLUMN).cast(DataType::String),
            col(ARR_TIME_COLUMN).cast(DataType::String),
            flying_time,
        ])
        .collect()
        .context("Failed to filter domestic schedule rows")?;

    Ok(df)
}

/// Parse a schedule CSV and convert the domestic rows to typed legs
pub fn parse_schedule_csv_to_legs(csv_path: &Path, domestic_flag: &str) -> Result<Vec<ScheduleLeg>> {
    let df = parse_schedule_csv(csv_path, domestic_flag)?;
    dataframe_to_legs(&df)
}

/// Convert a pruned schedule DataFrame to ScheduleLeg structures.
///
/// Any missing code, unparsable date or out-of-range time of day aborts the
/// conversion with the offending row.
pub fn dataframe_to_legs(df: &DataFrame) -> Result<Vec<ScheduleLeg>> {
    let height = df.height();
    let mut legs = Vec::with_capacity(height);

    let dep_airports = df.column(DEP_AIRPORT_COLUMN)?.str()?;
    let arr_airports = df.column(ARR_AIRPORT_COLUMN)?.str()?;
    let effective_from = df.column(EFFECTIVE_FROM_COLUMN)?.str()?;
    let effective_to = df.column(EFFECTIVE_TO_COLUMN)?.str()?;
    let dep_times = df.column(DEP_TIME_COLUMN)?.str()?;
    let arr_times = df.column(ARR_TIME_COLUMN)?.str()?;
    let flying_times = df
        .column(FLYING_TIME_COLUMN)
        .ok()
        .and_then(|c| c.str().ok());

    for i in 0..height {
        let departure_airport = dep_airports
            .get(i)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .with_context(|| format!("Missing {} at row {}", DEP_AIRPORT_COLUMN, i))?
            .to_string();

        let arrival_airport = arr_airports
            .get(i)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .with_context(|| format!("Missing {} at row {}", ARR_AIRPORT_COLUMN, i))?
            .to_string();

        let from = date_at(effective_from.get(i), EFFECTIVE_FROM_COLUMN, i)?;
        let to = date_at(effective_to.get(i), EFFECTIVE_TO_COLUMN, i)?;

        legs.push(ScheduleLeg {
            departure_airport,
            arrival_airport,
            departure_time: time_at(dep_times.get(i), DEP_TIME_COLUMN, i)?,
            arrival_time: time_at(arr_times.get(i), ARR_TIME_COLUMN, i)?,
            validity: ValidityWindow::new(from, to),
            flying_time: flying_times.and_then(|c| c.get(i)).map(|s| s.to_string()),
        });
    }

    log::info!("Converted {} domestic schedule legs", legs.len());
    Ok(legs)
}

fn date_at(value: Option<&str>, column: &str, row: usize) -> Result<chrono::NaiveDate, DensityError> {
    let raw = value.unwrap_or_default();
    parse_schedule_date(raw).ok_or_else(|| DensityError::malformed(row, column, raw))
}

fn time_at(value: Option<&str>, column: &str, row: usize) -> Result<TimeOfDay, DensityError> {
    let raw = value.unwrap_or_default();
    parse_hhmm(raw)
        .and_then(TimeOfDay::from_hhmm)
        .ok_or_else(|| DensityError::malformed(row, column, raw))
}

/// HHMM integer from a time cell; float-typed columns render as "1000.0".
fn parse_hhmm(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(hhmm) = raw.parse::<i64>() {
        return Some(hhmm);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
}
