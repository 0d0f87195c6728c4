use polars::prelude::DataFrame;

use crate::config::{PipelineConfig, CROP_TYPE_COLUMN, ELEVATION_COLUMN};
use crate::error::{PipelineError, Result};
use crate::field_corrections::{correct_sign, normalize_categories, rename_columns};
use crate::measurement_extractor::extract_measurements;
use crate::observer::PipelineObserver;
use crate::station_enricher::enrich_with_stations;
use crate::station_means::station_means;

/// Output of the weather pipeline: the message table with measurement
/// columns appended, and the station-by-kind mean matrix derived from it.
pub struct WeatherPipelineOutput {
    pub messages: DataFrame,
    pub means: DataFrame,
}

/// Correct and enrich a field record table.
///
/// Stages run in a fixed order, each consuming the previous stage's output:
/// column rename, sign correction, categorical normalization, station
/// enrichment. The first failing stage aborts the run; no partial table is
/// returned.
pub fn run_field_pipeline(
    records: DataFrame,
    stations: DataFrame,
    config: &PipelineConfig,
    observer: &dyn PipelineObserver,
) -> Result<DataFrame> {
    if records.height() == 0 {
        return Err(PipelineError::EmptyInput {
            stage: "field correction",
        });
    }
    if stations.height() == 0 {
        return Err(PipelineError::EmptyInput {
            stage: "station enrichment",
        });
    }

    let renamed = rename_columns(&records, &config.columns_to_rename)?;
    observer.stage_completed("column rename");

    let corrected = correct_sign(&renamed, ELEVATION_COLUMN)?;
    observer.stage_completed("sign correction");

    let normalized = normalize_categories(&corrected, CROP_TYPE_COLUMN, &config.values_to_rename)?;
    observer.stage_completed("categorical normalization");

    let enriched = enrich_with_stations(&normalized, &stations)?;
    observer.stage_completed("station enrichment");

    Ok(enriched)
}

/// Extract measurements from weather messages and aggregate them per
/// station.
pub fn run_weather_pipeline(
    messages: DataFrame,
    config: &PipelineConfig,
    observer: &dyn PipelineObserver,
) -> Result<WeatherPipelineOutput> {
    let extracted = extract_measurements(&messages, &config.patterns, observer)?;
    observer.stage_completed("measurement extraction");

    let means = station_means(&extracted)?;
    observer.stage_completed("station means");

    Ok(WeatherPipelineOutput {
        messages: extracted,
        means,
    })
}
