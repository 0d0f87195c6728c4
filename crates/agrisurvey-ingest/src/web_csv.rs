use std::io::Cursor;

use polars::prelude::*;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Fetches remote CSV resources into DataFrames.
#[derive(Clone, Default)]
pub struct CsvFetcher {
    client: reqwest::Client,
}

impl CsvFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch and parse a remote CSV resource.
    ///
    /// Empty and malformed payloads are rejected rather than returned as
    /// empty tables.
    pub async fn fetch_csv(&self, url: &str) -> Result<DataFrame> {
        debug!(url, "requesting CSV resource");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let payload = response.bytes().await?;
        debug!(url, bytes = payload.len(), "CSV payload received");

        dataframe_from_csv(url, &payload)
    }
}

/// Parse a CSV payload into a DataFrame.
pub fn dataframe_from_csv(url: &str, payload: &[u8]) -> Result<DataFrame> {
    if payload.iter().all(|byte| byte.is_ascii_whitespace()) {
        return Err(IngestError::EmptyResult {
            context: format!("CSV fetch from {url}"),
        });
    }

    let cursor = Cursor::new(payload);
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|source| IngestError::MalformedCsv {
            url: url.to_string(),
            source,
        })?;

    if df.height() == 0 {
        return Err(IngestError::EmptyResult {
            context: format!("CSV fetch from {url}"),
        });
    }

    Ok(df)
}
