use polars::prelude::*;

use crate::error::Result;
use crate::field_corrections::ensure_column;
use crate::measurement_extractor::{MEASUREMENT_COLUMN, VALUE_COLUMN};

/// Grouping key for measurement aggregation.
pub const STATION_COLUMN: &str = "Weather_station_ID";

/// Compute per-station mean values and reshape into a station-by-kind
/// matrix.
///
/// Rows with a null measurement pair are unmatched messages; they are
/// excluded and contribute to no mean. A station/kind combination with no
/// contributing rows stays null rather than zero. The grouped result is
/// sorted before the pivot, so row and column order are reproducible and
/// independent of input row order.
pub fn station_means(df: &DataFrame) -> Result<DataFrame> {
    ensure_column(df, STATION_COLUMN)?;
    ensure_column(df, MEASUREMENT_COLUMN)?;
    ensure_column(df, VALUE_COLUMN)?;

    let grouped = df
        .clone()
        .lazy()
        .filter(
            col(MEASUREMENT_COLUMN)
                .is_not_null()
                .and(col(VALUE_COLUMN).is_not_null()),
        )
        .group_by_stable([col(STATION_COLUMN), col(MEASUREMENT_COLUMN)])
        .agg([col(VALUE_COLUMN).mean().alias(VALUE_COLUMN)])
        .sort(
            [STATION_COLUMN, MEASUREMENT_COLUMN],
            SortMultipleOptions::default(),
        )
        .collect()?;

    let means = polars::lazy::frame::pivot::pivot_stable(
        &grouped,
        [MEASUREMENT_COLUMN],
        Some([STATION_COLUMN]),
        Some([VALUE_COLUMN]),
        false,
        Some(col(VALUE_COLUMN).first()),
        None,
    )?;

    Ok(means)
}
