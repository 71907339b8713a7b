use std::fs;
use std::path::PathBuf;

use goal_intervals::extract::extract_interval_averages;
use goal_intervals::fixtures::parse_fixtures_json;
use goal_intervals::interval::Interval;
use goal_intervals::provider::{ProviderError, parse_envelope};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_team_fixtures_envelope() {
    let raw = read_fixture("team_fixtures.json");
    let fixtures = parse_envelope(&raw).expect("fixture should parse");
    assert_eq!(fixtures.len(), 3);
    assert_eq!(fixtures[0].id, Some(1208001));
    assert_eq!(fixtures[0].date.as_deref(), Some("2025-04-06T13:00:00+00:00"));
    assert_eq!(fixtures[0].statistics.len(), 2);
    assert!(fixtures[2].statistics.is_empty());
}

#[test]
fn ragged_envelope_averages_per_interval() {
    let raw = read_fixture("team_fixtures.json");
    let fixtures = parse_envelope(&raw).expect("fixture should parse");

    let avg = extract_interval_averages(&fixtures, "Chelsea");
    let values: Vec<f64> = avg.iter().map(|a| a.avg).collect();
    assert_eq!(values, vec![2.0, 1.0, 0.0, 0.0, 1.0, 0.0]);

    let brentford = extract_interval_averages(&fixtures, "Brentford");
    assert_eq!(brentford[Interval::Min76To90.index()].avg, 2.0);
    assert_eq!(brentford[Interval::Min0To15.index()].avg, 0.0);
}

#[test]
fn api_errors_fail_the_query() {
    let raw = read_fixture("api_error.json");
    let err = parse_envelope(&raw).expect_err("errors member should fail");
    assert!(matches!(err, ProviderError::Api(_)));
    assert!(!err.is_retryable());
}

#[test]
fn invalid_json_is_a_parse_error() {
    let err = parse_envelope("{not json").expect_err("should fail");
    assert!(matches!(err, ProviderError::Parse(_)));
}

#[test]
fn null_bodies_are_empty() {
    assert!(parse_envelope("null").expect("null should parse").is_empty());
    assert!(parse_envelope("  ").expect("blank should parse").is_empty());
    assert!(parse_fixtures_json("null").expect("null should parse").is_empty());
}

#[test]
fn bare_arrays_parse_as_fixture_lists() {
    let fixtures = parse_fixtures_json(
        r#"[{"statistics":[{"team":{"name":"Arsenal"},"statistics":{"goals":{"0-15":{"total":1}}}}]}]"#,
    )
    .expect("array should parse");
    assert_eq!(fixtures.len(), 1);
    let avg = extract_interval_averages(&fixtures, "Arsenal");
    assert_eq!(avg[0].avg, 1.0);
}
