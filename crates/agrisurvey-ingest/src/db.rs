use std::time::Duration;

use polars::prelude::{Column as PolarsColumn, DataFrame, NamedFrom, Series};
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Pool, Row, Sqlite, TypeInfo};
use tracing::info;

use crate::error::{IngestError, Result};

pub type DbPool = Pool<Sqlite>;

/// The fixed survey join. All auxiliary feature tables hang off the main
/// geographic table by `Field_ID`, so unmatched rows keep their left side.
const FIELD_SURVEY_QUERY: &str = r#"
SELECT *
FROM geographic_features
LEFT JOIN weather_features USING (Field_ID)
LEFT JOIN soil_and_crop_features USING (Field_ID)
LEFT JOIN farm_management_features USING (Field_ID)
"#;

/// Establish a SQLite connection pool for the survey database.
pub async fn connect(database_url: &str) -> Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .map_err(IngestError::Connection)?;

    info!("database connection pool established");
    Ok(pool)
}

/// Execute the fixed multi-table survey join and return every resulting row.
///
/// An empty result set is a data-quality failure, not a valid output.
pub async fn fetch_joined_records(pool: &DbPool) -> Result<DataFrame> {
    let rows = sqlx::query(FIELD_SURVEY_QUERY)
        .fetch_all(pool)
        .await
        .map_err(IngestError::Query)?;

    if rows.is_empty() {
        return Err(IngestError::EmptyResult {
            context: "field survey query".to_string(),
        });
    }

    let df = dataframe_from_rows(&rows)?;
    info!(rows = df.height(), "survey records fetched");
    Ok(df)
}

/// Convert query rows into a DataFrame, one Series per result column.
///
/// Column contents are decoded by declared SQLite type. Anything that is not
/// declared INTEGER or REAL is read as text; downstream stages own the
/// semantics of each column, so no assumptions are made here beyond that.
fn dataframe_from_rows(rows: &[SqliteRow]) -> Result<DataFrame> {
    let mut columns: Vec<PolarsColumn> = Vec::with_capacity(rows[0].columns().len());

    for (idx, column) in rows[0].columns().iter().enumerate() {
        let name = column.name();
        let series = match column.type_info().name() {
            "INTEGER" => {
                let values = rows
                    .iter()
                    .map(|row| row.try_get::<Option<i64>, _>(idx))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(IngestError::Query)?;
                Series::new(name.into(), values)
            }
            "REAL" | "NUMERIC" => {
                let values = rows
                    .iter()
                    .map(|row| row.try_get::<Option<f64>, _>(idx))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(IngestError::Query)?;
                Series::new(name.into(), values)
            }
            _ => {
                let values = rows
                    .iter()
                    .map(|row| row.try_get::<Option<String>, _>(idx))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(IngestError::Query)?;
                Series::new(name.into(), values)
            }
        };
        columns.push(series.into());
    }

    Ok(DataFrame::new(columns)?)
}
