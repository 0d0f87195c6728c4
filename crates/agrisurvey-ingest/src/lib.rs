pub mod db;
pub mod error;
pub mod web_csv;

pub use db::{connect, fetch_joined_records, DbPool};
pub use error::IngestError;
pub use web_csv::{dataframe_from_csv, CsvFetcher};
