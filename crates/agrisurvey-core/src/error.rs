// crates/agrisurvey-core/src/error.rs

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} received an empty table")]
    EmptyInput { stage: &'static str },

    #[error("renaming columns would leave duplicate labels: {labels:?}")]
    RenameCollision { labels: Vec<String> },

    #[error("required column '{column}' is missing")]
    MissingColumn { column: String },

    #[error("station mapping contains {extra} duplicate Field_ID rows")]
    DuplicateMappingKeys { extra: usize },

    #[error("pattern '{kind}' is not a valid regular expression: {source}")]
    InvalidPattern {
        kind: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern '{kind}' must contain at least one capturing group")]
    PatternWithoutCapture { kind: String },

    #[error("pattern '{kind}' matched without capturing a value")]
    CaptureMissing { kind: String },

    #[error("pattern '{kind}' captured non-numeric text '{captured}'")]
    NonNumericCapture { kind: String, captured: String },

    #[error("configuration file is invalid: {0}")]
    Config(#[from] toml::de::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
