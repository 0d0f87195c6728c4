use polars::prelude::*;

use agrisurvey_core::config::PipelineConfig;
use agrisurvey_core::error::PipelineError;
use agrisurvey_core::observer::SilentObserver;
use agrisurvey_core::pipelines::{run_field_pipeline, run_weather_pipeline};

fn test_config() -> PipelineConfig {
    PipelineConfig::from_toml_str(
        r#"
logging_level = "NONE"
weather_mapping_source = "http://example.test/mapping.csv"
weather_message_source = "http://example.test/messages.csv"

[values_to_rename]
mais = "Maize"

[[regex_patterns]]
kind = "Rainfall"
pattern = '(\d+(\.\d+)?)\s?mm'

[[regex_patterns]]
kind = "Temperature"
pattern = '(\d+(\.\d+)?)\s?C'
"#,
    )
    .expect("config")
}

#[test]
fn field_pipeline_corrects_and_enriches() {
    let records = df!(
        "Field_ID" => &[1i64],
        "Elevation" => &[-50.0f64],
        "Crop_type" => &["mais"],
    )
    .unwrap();
    let stations = df!(
        "Field_ID" => &[1i64],
        "Weather_station_ID" => &[4i64],
    )
    .unwrap();

    let enriched =
        run_field_pipeline(records, stations, &test_config(), &SilentObserver).unwrap();

    assert_eq!(enriched.height(), 1);
    let elevation = enriched.column("Elevation").unwrap().f64().unwrap();
    assert_eq!(elevation.get(0), Some(50.0));
    let crops = enriched.column("Crop_type").unwrap().str().unwrap();
    assert_eq!(crops.get(0), Some("Maize"));
    let stations = enriched.column("Weather_station_ID").unwrap().i64().unwrap();
    assert_eq!(stations.get(0), Some(4));
}

#[test]
fn field_pipeline_rejects_empty_records() {
    let records = df!(
        "Field_ID" => Vec::<i64>::new(),
        "Elevation" => Vec::<f64>::new(),
        "Crop_type" => Vec::<String>::new(),
    )
    .unwrap();
    let stations = df!(
        "Field_ID" => &[1i64],
        "Weather_station_ID" => &[4i64],
    )
    .unwrap();

    let result = run_field_pipeline(records, stations, &test_config(), &SilentObserver);

    assert!(matches!(result, Err(PipelineError::EmptyInput { .. })));
}

#[test]
fn weather_pipeline_extracts_and_aggregates() {
    let messages = df!(
        "Weather_station_ID" => &["S1", "S1", "S1", "S2"],
        "Message" => &[
            Some("10 mm rainfall overnight"),
            Some("20 mm rainfall by morning"),
            Some("midday high of 5 C"),
            Some("sensor fault"),
        ],
    )
    .unwrap();

    let output = run_weather_pipeline(messages, &test_config(), &SilentObserver).unwrap();

    assert_eq!(output.messages.height(), 4);

    let means = output
        .means
        .sort(["Weather_station_ID"], SortMultipleOptions::default())
        .unwrap();
    let rainfall = means.column("Rainfall").unwrap().f64().unwrap();
    let temperature = means.column("Temperature").unwrap().f64().unwrap();
    assert_eq!(rainfall.get(0), Some(15.0));
    assert_eq!(temperature.get(0), Some(5.0));
}

#[test]
fn weather_pipeline_rejects_empty_messages() {
    let messages = df!(
        "Weather_station_ID" => Vec::<String>::new(),
        "Message" => Vec::<String>::new(),
    )
    .unwrap();

    let result = run_weather_pipeline(messages, &test_config(), &SilentObserver);

    assert!(matches!(result, Err(PipelineError::EmptyInput { .. })));
}
