use serde_json::{Value, json};

use goal_intervals::extract::{collect_samples, extract_interval_averages};
use goal_intervals::fixtures::{FixtureRecord, parse_fixture_record};
use goal_intervals::interval::Interval;

const LABELS: [&str; 6] = ["0-15", "16-30", "31-45", "46-60", "61-75", "76-90"];

fn goals(totals: [Value; 6]) -> Value {
    let mut map = serde_json::Map::new();
    for (interval, total) in Interval::ALL.into_iter().zip(totals) {
        map.insert(interval.provider_key().to_string(), json!({ "total": total }));
    }
    Value::Object(map)
}

fn fixture(entries: Vec<(&str, Value)>) -> FixtureRecord {
    let statistics: Vec<Value> = entries
        .into_iter()
        .map(|(team, goals)| json!({ "team": { "name": team }, "statistics": { "goals": goals } }))
        .collect();
    parse_fixture_record(&json!({ "statistics": statistics }))
}

fn only_first(total: i64) -> Value {
    goals([json!(total), Value::Null, Value::Null, Value::Null, Value::Null, Value::Null])
}

#[test]
fn empty_input_yields_six_zero_averages() {
    let fixtures: Vec<FixtureRecord> = Vec::new();
    let avg = extract_interval_averages(&fixtures, "Liverpool");
    assert_eq!(avg.len(), 6);
    for (a, label) in avg.iter().zip(LABELS) {
        assert_eq!(a.interval.label(), label);
        assert_eq!(a.avg, 0.0);
    }
}

#[test]
fn single_entry_with_nulls_counts_zero_samples() {
    let fixtures = vec![fixture(vec![("Liverpool", only_first(2))])];
    let avg = extract_interval_averages(&fixtures, "Liverpool");
    assert_eq!(avg[0].avg, 2.0);
    for a in &avg[1..] {
        assert_eq!(a.avg, 0.0);
        assert!(!a.avg.is_nan());
    }
    let samples = collect_samples(&fixtures, "Liverpool");
    for interval in Interval::ALL {
        assert_eq!(samples.count(interval), 1);
    }
}

#[test]
fn averages_across_fixtures() {
    let fixtures = vec![
        fixture(vec![("Liverpool", only_first(2))]),
        fixture(vec![("Liverpool", only_first(4))]),
    ];
    let avg = extract_interval_averages(&fixtures, "Liverpool");
    assert_eq!(avg[Interval::Min0To15.index()].avg, 3.0);
}

#[test]
fn fixtures_without_matching_entries_add_no_samples() {
    let fixtures = vec![
        fixture(vec![("Liverpool", only_first(4))]),
        fixture(vec![("Arsenal", only_first(1))]),
        parse_fixture_record(&json!({ "fixture": { "id": 3 } })),
    ];
    let avg = extract_interval_averages(&fixtures, "Liverpool");
    // Only one sample: the Arsenal-only and stat-less fixtures are not zeros.
    assert_eq!(avg[0].avg, 4.0);
}

#[test]
fn team_name_match_is_exact() {
    let fixtures = vec![fixture(vec![
        ("liverpool", only_first(5)),
        ("Liverpool ", only_first(5)),
        (" Liverpool", only_first(5)),
        ("LIVERPOOL", only_first(5)),
    ])];
    let avg = extract_interval_averages(&fixtures, "Liverpool");
    assert!(avg.iter().all(|a| a.avg == 0.0));
    assert_eq!(collect_samples(&fixtures, "Liverpool").count(Interval::Min0To15), 0);
}

#[test]
fn missing_goals_mapping_skips_the_entry() {
    let stat_less = parse_fixture_record(&json!({
        "statistics": [
            { "team": { "name": "Liverpool" }, "statistics": { "goals": null } },
            { "team": { "name": "Liverpool" }, "statistics": {} },
            { "team": { "name": "Liverpool" } },
            { "statistics": { "goals": {} } }
        ]
    }));
    let fixtures = vec![stat_less, fixture(vec![("Liverpool", only_first(3))])];
    let avg = extract_interval_averages(&fixtures, "Liverpool");
    assert_eq!(avg[0].avg, 3.0);
}

#[test]
fn malformed_totals_are_zero_samples() {
    let fixtures = vec![
        fixture(vec![(
            "Liverpool",
            goals([
                json!("two"),
                json!({ "nested": 1 }),
                json!([1]),
                json!(true),
                json!(2),
                json!(1.5),
            ]),
        )]),
        fixture(vec![("Liverpool", json!({ "0'-15'": { "total": 2 } }))]),
    ];
    let avg = extract_interval_averages(&fixtures, "Liverpool");
    let values: Vec<f64> = avg.iter().map(|a| a.avg).collect();
    assert_eq!(values, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.75]);
}

#[test]
fn extraction_is_idempotent() {
    let fixtures = vec![
        fixture(vec![("Liverpool", only_first(1)), ("Arsenal", only_first(2))]),
        fixture(vec![("Liverpool", only_first(2))]),
    ];
    let a = extract_interval_averages(&fixtures, "Liverpool");
    let b = extract_interval_averages(&fixtures, "Liverpool");
    assert_eq!(a, b);
}

#[test]
fn multiple_matching_entries_in_one_fixture_each_count() {
    let fixtures = vec![fixture(vec![
        ("Liverpool", only_first(1)),
        ("Liverpool", only_first(3)),
    ])];
    let avg = extract_interval_averages(&fixtures, "Liverpool");
    assert_eq!(avg[0].avg, 2.0);
}

#[test]
fn numeric_string_totals_are_zero_samples() {
    let fixtures = vec![fixture(vec![(
        "Chelsea",
        json!({ "0'-15'": { "total": "3" }, "16'-30'": { "total": 1 } }),
    )])];
    let avg = extract_interval_averages(&fixtures, "Chelsea");
    assert_eq!(avg[Interval::Min0To15.index()].avg, 0.0);
    assert_eq!(avg[Interval::Min16To30.index()].avg, 1.0);
}
