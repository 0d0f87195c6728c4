use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("database connection failed: {0}")]
    Connection(sqlx::Error),

    #[error("survey query failed: {0}")]
    Query(sqlx::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{context} returned no rows")]
    EmptyResult { context: String },

    #[error("malformed CSV payload from {url}: {source}")]
    MalformedCsv { url: String, source: PolarsError },

    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
