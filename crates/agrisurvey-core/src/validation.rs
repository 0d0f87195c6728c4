use std::collections::HashSet;

use polars::prelude::*;

use crate::error::{PipelineError, Result};

/// Column set every enriched field table must carry, before any enrichment
/// columns contributed by the station mapping.
pub const REQUIRED_FIELD_COLUMNS: [&str; 18] = [
    "Field_ID",
    "Elevation",
    "Latitude",
    "Longitude",
    "Location",
    "Slope",
    "Rainfall",
    "Min_temperature_C",
    "Max_temperature_C",
    "Temperature",
    "Soil_fertility",
    "Soil_type",
    "pH",
    "Pollution_level",
    "Plot_size",
    "Annual_yield",
    "Crop_type",
    "Standard_yield",
];

/// Check that every required column is present.
pub fn validate_required_columns(df: &DataFrame) -> Result<()> {
    let present: HashSet<&str> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();

    for column in REQUIRED_FIELD_COLUMNS {
        if !present.contains(column) {
            return Err(PipelineError::MissingColumn {
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Check that every value in `column` is non-negative.
pub fn validate_non_negative(df: &DataFrame, column: &str) -> Result<()> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let values = series.f64()?;

    if let Some(min) = values.min() {
        if min < 0.0 {
            return Err(PipelineError::Validation(format!(
                "column '{column}' contains negative values (minimum {min})"
            )));
        }
    }
    Ok(())
}

/// Check that every value in `column` is strictly positive.
pub fn validate_positive(df: &DataFrame, column: &str) -> Result<()> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let values = series.f64()?;

    if let Some(min) = values.min() {
        if min <= 0.0 {
            return Err(PipelineError::Validation(format!(
                "column '{column}' contains non-positive values (minimum {min})"
            )));
        }
    }
    Ok(())
}

/// Check that every value in `column` is drawn from the allowed vocabulary.
pub fn validate_categories(df: &DataFrame, column: &str, allowed: &[&str]) -> Result<()> {
    let allowed: HashSet<&str> = allowed.iter().copied().collect();
    let values = df.column(column)?.str()?;

    let mut invalid: Vec<String> = Vec::new();
    for idx in 0..values.len() {
        if let Some(value) = values.get(idx) {
            if !allowed.contains(value) && !invalid.iter().any(|seen| seen == value) {
                invalid.push(value.to_string());
            }
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Validation(format!(
            "column '{column}' contains values outside the vocabulary: {invalid:?}"
        )))
    }
}
