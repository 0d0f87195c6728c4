use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::measurement_extractor::MeasurementMatcher;

/// The column whose sign is corrected during field processing.
pub const ELEVATION_COLUMN: &str = "Elevation";
/// The categorical column normalized against the rename mapping.
pub const CROP_TYPE_COLUMN: &str = "Crop_type";
/// The key joining field records to station mappings.
pub const FIELD_ID_COLUMN: &str = "Field_ID";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoggingLevel {
    Debug,
    #[default]
    Info,
    /// Suppresses all pipeline log output.
    None,
}

impl LoggingLevel {
    /// Directive for an `EnvFilter`-style subscriber.
    pub fn as_filter(self) -> &'static str {
        match self {
            LoggingLevel::Debug => "debug",
            LoggingLevel::Info => "info",
            LoggingLevel::None => "off",
        }
    }
}

#[derive(Debug, Deserialize)]
struct PatternEntry {
    kind: String,
    pattern: String,
}

/// On-disk shape of the configuration file. Deserialization keeps the
/// `regex_patterns` array order, which downstream matching depends on.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    columns_to_rename: HashMap<String, String>,
    #[serde(default)]
    values_to_rename: HashMap<String, String>,
    weather_mapping_source: String,
    weather_message_source: String,
    regex_patterns: Vec<PatternEntry>,
    #[serde(default)]
    logging_level: LoggingLevel,
}

/// Validated pipeline configuration. Every recognized option is listed here
/// with its type; nothing is looked up lazily. Construction compiles each
/// measurement pattern and rejects patterns without a capturing group.
#[derive(Debug)]
pub struct PipelineConfig {
    pub columns_to_rename: HashMap<String, String>,
    pub values_to_rename: HashMap<String, String>,
    pub weather_mapping_source: String,
    pub weather_message_source: String,
    pub patterns: Vec<MeasurementMatcher>,
    pub logging_level: LoggingLevel,
}

impl PipelineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: ConfigFile = toml::from_str(text)?;

        let mut patterns = Vec::with_capacity(raw.regex_patterns.len());
        for entry in raw.regex_patterns {
            patterns.push(MeasurementMatcher::new(entry.kind, &entry.pattern)?);
        }

        Ok(Self {
            columns_to_rename: raw.columns_to_rename,
            values_to_rename: raw.values_to_rename,
            weather_mapping_source: raw.weather_mapping_source,
            weather_message_source: raw.weather_message_source,
            patterns,
            logging_level: raw.logging_level,
        })
    }
}
