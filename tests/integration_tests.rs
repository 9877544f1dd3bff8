use air_quality_stats::output::{Format, report_lines, text_lines};
use air_quality_stats::parser::parse_readings;
use air_quality_stats::reading::{Pollutant, Reading};
use air_quality_stats::stats::{
    Summary, calculate_averages, find_highest_pollutant_by_hour, summarize,
};

#[test]
fn test_full_pipeline() {
    let bytes = include_bytes!("fixtures/sample_readings.json");
    let readings = parse_readings(bytes).expect("Failed to parse readings");
    assert_eq!(readings.len(), 3);

    let averages = calculate_averages(&readings).unwrap();
    assert!((averages[&Pollutant::Pm25] - 24.833_333_333).abs() < 1e-6);
    assert!((averages[&Pollutant::Co2] - 403.666_666_666).abs() < 1e-6);

    let peaks = find_highest_pollutant_by_hour(&readings).unwrap();
    assert_eq!(peaks[&10], Some(Pollutant::Co2));
    assert_eq!(peaks[&11], Some(Pollutant::Co2));

    let lines = text_lines(&Summary::from_readings(&readings));
    assert_eq!(
        lines,
        [
            "Average CO2: 403.67",
            "Average PM25: 24.83",
            "Hour 10: Highest Pollutant - CO2",
            "Hour 11: Highest Pollutant - CO2",
        ]
    );
}

#[test]
fn test_malformed_payload_stops_pipeline() {
    let bytes = br#"[{"sensor_id": "S001", "timestamp": "not a date", "pm25": 1.0, "co2": 2.0}]"#;
    assert!(parse_readings(bytes).is_err());
}

#[test]
fn test_malformed_payload_reports_only_error_line() {
    let payloads: [&[u8]; 3] = [
        br#"[{"sensor_id": "S001", "timestamp": "not a date", "pm25": 1.0, "co2": 2.0}]"#,
        br#"{"sensor_id": "S001", "timestamp": "2023-12-28T10:00:00Z", "pm25": 1.0, "co2": 2.0}"#,
        b"[{\"sensor_id\": \"S001\", \"timestamp\": \"2023-12-28T10:00:00Z\", \x01}]",
    ];

    for bytes in payloads {
        let decoder_err = serde_json::from_slice::<Vec<Reading>>(bytes).unwrap_err();

        for format in [Format::Text, Format::Json] {
            let lines = report_lines(&summarize(bytes), format).unwrap();
            assert_eq!(lines, [format!("Error parsing readings: {decoder_err}")]);
            assert!(
                !lines
                    .iter()
                    .any(|l| l.starts_with("Average") || l.starts_with("Hour"))
            );
        }
    }
}

#[test]
fn test_empty_batch_reports_nothing() {
    let readings = parse_readings(b"[]").unwrap();
    let summary = Summary::from_readings(&readings);

    assert_eq!(summary.averages, None);
    assert_eq!(summary.hourly_peaks, None);
    assert!(text_lines(&summary).is_empty());
}
