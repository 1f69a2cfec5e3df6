use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::core::domain::AirportRecord;

pub const IATA_CODE_COLUMN: &str = "iata_code";
pub const COUNTRY_COLUMN: &str = "iso_country";
pub const TYPE_COLUMN: &str = "type";
pub const NAME_COLUMN: &str = "name";
pub const LATITUDE_COLUMN: &str = "latitude_deg";
pub const LONGITUDE_COLUMN: &str = "longitude_deg";

const STRING_COLUMNS: [&str; 4] = [IATA_CODE_COLUMN, COUNTRY_COLUMN, TYPE_COLUMN, NAME_COLUMN];
const FLOAT_COLUMNS: [&str; 2] = [LATITUDE_COLUMN, LONGITUDE_COLUMN];

/// Parse an airport CSV file into a Polars DataFrame with the columns the
/// airport directory reads
pub fn parse_airports_csv(csv_path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(csv_path.into()))?
        .finish()
        .context("Failed to parse airport CSV into DataFrame")?;

    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for required in STRING_COLUMNS.iter().chain(FLOAT_COLUMNS.iter()) {
        if !column_names.iter().any(|c| c == required) {
            anyhow::bail!("Airport CSV is missing column '{}'", required);
        }
    }

    // Codes such as "123" or all-empty columns may be inferred as numbers
    let mut projection: Vec<Expr> = STRING_COLUMNS
        .iter()
        .map(|name| col(*name).cast(DataType::String))
        .collect();
    projection.extend(
        FLOAT_COLUMNS
            .iter()
            .map(|name| col(*name).cast(DataType::Float64)),
    );

    let df = df
        .lazy()
        .select(projection)
        .collect()
        .context("Failed to cast airport columns to expected types")?;

    Ok(df)
}

/// Parse an airport CSV and convert it to raw AirportRecord structures
pub fn parse_airports_csv_to_records(csv_path: &Path) -> Result<Vec<AirportRecord>> {
    let df = parse_airports_csv(csv_path)?;
    dataframe_to_airports(&df)
}

/// Convert an airport DataFrame to AirportRecord structures. Missing cells
/// become `None`; filtering is left to the directory.
pub fn dataframe_to_airports(df: &DataFrame) -> Result<Vec<AirportRecord>> {
    let codes = df.column(IATA_CODE_COLUMN)?.str()?;
    let countries = df.column(COUNTRY_COLUMN)?.str()?;
    let types = df.column(TYPE_COLUMN)?.str()?;
    let names = df.column(NAME_COLUMN)?.str()?;
    let latitudes = df.column(LATITUDE_COLUMN)?.f64()?;
    let longitudes = df.column(LONGITUDE_COLUMN)?.f64()?;

    let owned = |value: Option<&str>| value.map(|s| s.to_string());

    let records = (0..df.height())
        .map(|i| AirportRecord {
            iata_code: owned(codes.get(i)),
            iso_country: owned(countries.get(i)),
            airport_type: owned(types.get(i)),
            name: owned(names.get(i)),
            latitude: latitudes.get(i),
            longitude: longitudes.get(i),
        })
        .collect();

    Ok(records)
}
