use polars::prelude::*;

use agrisurvey_core::error::PipelineError;
use agrisurvey_core::measurement_extractor::{
    extract_measurement, extract_measurements, MeasurementMatcher,
};
use agrisurvey_core::observer::SilentObserver;

fn weather_patterns() -> Vec<MeasurementMatcher> {
    vec![
        MeasurementMatcher::new("Rainfall".to_string(), r"(\d+(\.\d+)?)\s?mm").unwrap(),
        MeasurementMatcher::new("Temperature".to_string(), r"(\d+(\.\d+)?)\s?C").unwrap(),
        MeasurementMatcher::new(
            "Pollution_level".to_string(),
            r"=\s*(-?\d+(\.\d+)?)|Pollution at \s*(-?\d+(\.\d+)?)",
        )
        .unwrap(),
    ]
}

#[test]
fn every_row_yields_exactly_one_pair() {
    let df = df!(
        "Weather_station_ID" => &[0i64, 0, 1, 1],
        "Message" => &[
            Some("Light rain, 12.5 mm recorded"),
            Some("Clear skies all day"),
            Some("Temperature reading of 31 C at noon"),
            None,
        ],
    )
    .unwrap();

    let extracted = extract_measurements(&df, &weather_patterns(), &SilentObserver).unwrap();

    assert_eq!(extracted.height(), df.height());
    let kinds = extracted.column("Measurement").unwrap().str().unwrap();
    let values = extracted.column("Value").unwrap().f64().unwrap();

    assert_eq!(kinds.get(0), Some("Rainfall"));
    assert_eq!(values.get(0), Some(12.5));
    assert_eq!(kinds.get(1), None);
    assert_eq!(values.get(1), None);
    assert_eq!(kinds.get(2), Some("Temperature"));
    assert_eq!(values.get(2), Some(31.0));
    assert_eq!(kinds.get(3), None);
    assert_eq!(values.get(3), None);
}

#[test]
fn earlier_pattern_wins_on_ambiguous_text() {
    let patterns = weather_patterns();

    // Satisfies both the rainfall and the temperature pattern.
    let result = extract_measurement(&patterns, "5 mm of rain at 20 C").unwrap();

    assert_eq!(result, Some(("Rainfall", 5.0)));
}

#[test]
fn first_non_null_capture_group_is_used() {
    let patterns = weather_patterns();

    // Matches the second alternative of the pollution pattern, so the first
    // two capture groups are empty.
    let result = extract_measurement(&patterns, "Pollution at 13.2").unwrap();

    assert_eq!(result, Some(("Pollution_level", 13.2)));
}

#[test]
fn unmatched_message_is_not_an_error() {
    let patterns = weather_patterns();

    let result = extract_measurement(&patterns, "gauge offline").unwrap();

    assert_eq!(result, None);
}

#[test]
fn non_numeric_capture_fails_loudly() {
    let patterns =
        vec![MeasurementMatcher::new("Wind".to_string(), r"wind ([a-z]+)").unwrap()];

    let result = extract_measurement(&patterns, "wind high");

    assert!(matches!(
        result,
        Err(PipelineError::NonNumericCapture { .. })
    ));
}

#[test]
fn match_without_capture_fails_loudly() {
    let patterns = vec![MeasurementMatcher::new(
        "Rainfall".to_string(),
        r"rain|(\d+) cm",
    )
    .unwrap()];

    let result = extract_measurement(&patterns, "rain expected");

    assert!(matches!(result, Err(PipelineError::CaptureMissing { .. })));
}

#[test]
fn empty_message_table_is_rejected() {
    let df = df!(
        "Weather_station_ID" => Vec::<i64>::new(),
        "Message" => Vec::<String>::new(),
    )
    .unwrap();

    let result = extract_measurements(&df, &weather_patterns(), &SilentObserver);

    assert!(matches!(result, Err(PipelineError::EmptyInput { .. })));
}
