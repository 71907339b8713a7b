use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use goal_intervals::combine::{FixedConceded, combine};
use goal_intervals::extract::extract_interval_averages;
use goal_intervals::fixtures::FixtureRecord;
use goal_intervals::provider::{DemoProvider, FixtureProvider, parse_envelope};

fn demo_pool(team: &str, count: u8) -> Vec<FixtureRecord> {
    DemoProvider::new(7)
        .recent_fixtures(team, count)
        .expect("demo provider never fails")
}

fn bench_envelope_parse(c: &mut Criterion) {
    c.bench_function("envelope_parse", |b| {
        b.iter(|| {
            let fixtures = parse_envelope(black_box(TEAM_FIXTURES_JSON)).unwrap();
            black_box(fixtures.len());
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    let fixtures = demo_pool("Chelsea", 20);
    c.bench_function("extract_interval_averages", |b| {
        b.iter(|| {
            let avg = extract_interval_averages(black_box(&fixtures), "Chelsea");
            black_box(avg[0].avg);
        })
    });
}

fn bench_combine(c: &mut Criterion) {
    let home = demo_pool("Liverpool", 20);
    let away = demo_pool("Arsenal", 20);
    let h2h = DemoProvider::new(7)
        .head_to_head("Liverpool", "Arsenal")
        .expect("demo provider never fails");
    c.bench_function("combine", |b| {
        b.iter(|| {
            let rows = combine(
                black_box(&home),
                black_box(&away),
                black_box(&h2h),
                "Liverpool",
                "Arsenal",
                &mut FixedConceded(0.0),
            );
            black_box(rows[0].scored_home);
        })
    });
}

criterion_group!(perf, bench_envelope_parse, bench_extract, bench_combine);
criterion_main!(perf);

static TEAM_FIXTURES_JSON: &str = include_str!("../tests/fixtures/team_fixtures.json");
