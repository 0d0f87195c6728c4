use polars::prelude::*;

use crate::config::FIELD_ID_COLUMN;
use crate::error::{PipelineError, Result};
use crate::field_corrections::ensure_column;

/// Left-join station mapping metadata onto the field records by `Field_ID`.
///
/// Every row of the field table is preserved; fields without a mapped
/// station get nulls in the station columns. The mapping must carry at most
/// one row per `Field_ID`; duplicates are rejected before the join.
pub fn enrich_with_stations(df: &DataFrame, stations: &DataFrame) -> Result<DataFrame> {
    ensure_column(df, FIELD_ID_COLUMN)?;
    ensure_column(stations, FIELD_ID_COLUMN)?;

    let unique_keys = stations
        .column(FIELD_ID_COLUMN)?
        .as_materialized_series()
        .n_unique()?;
    if unique_keys != stations.height() {
        return Err(PipelineError::DuplicateMappingKeys {
            extra: stations.height() - unique_keys,
        });
    }

    Ok(df
        .clone()
        .lazy()
        .join(
            stations.clone().lazy(),
            [col(FIELD_ID_COLUMN)],
            [col(FIELD_ID_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()?)
}
