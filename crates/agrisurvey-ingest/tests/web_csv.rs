use agrisurvey_ingest::{dataframe_from_csv, IngestError};

#[test]
fn parses_a_station_mapping_payload() {
    let payload = b"Field_ID,Weather_station_ID\n1,0\n2,0\n3,1\n";

    let df = dataframe_from_csv("http://example.test/mapping.csv", payload).expect("parse");

    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 2);
    let stations = df.column("Weather_station_ID").unwrap().i64().unwrap();
    assert_eq!(stations.get(2), Some(1));
}

#[test]
fn empty_payload_is_rejected() {
    let result = dataframe_from_csv("http://example.test/empty.csv", b"");

    assert!(matches!(result, Err(IngestError::EmptyResult { .. })));
}

#[test]
fn header_only_payload_is_rejected() {
    let payload = b"Field_ID,Weather_station_ID\n";

    let result = dataframe_from_csv("http://example.test/header.csv", payload);

    assert!(matches!(result, Err(IngestError::EmptyResult { .. })));
}
