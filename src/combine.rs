use rand::Rng;
use serde::Serialize;

use crate::extract::{IntervalAverage, extract_interval_averages};
use crate::fixtures::FixtureRecord;
use crate::interval::{INTERVAL_COUNT, Interval};

/// Upper bound (exclusive) of the placeholder conceded figures.
pub const PLACEHOLDER_CONCEDED_MAX: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRow {
    pub interval: &'static str,
    pub scored_home: f64,
    pub conceded_home: f64,
    pub scored_away: f64,
    pub conceded_away: f64,
}

/// Supplies the "conceded" columns. No real conceded statistic is computed yet, so every
/// implementation here is a stand-in and the UI labels it as such.
pub trait ConcededSource {
    fn conceded(&mut self, side: Side, interval: Interval) -> f64;
}

/// Uniform values in `[0, 0.3)`.
pub struct RandomPlaceholder<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomPlaceholder<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ConcededSource for RandomPlaceholder<R> {
    fn conceded(&mut self, _side: Side, _interval: Interval) -> f64 {
        self.rng.gen_range(0.0..PLACEHOLDER_CONCEDED_MAX)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedConceded(pub f64);

impl ConcededSource for FixedConceded {
    fn conceded(&mut self, _side: Side, _interval: Interval) -> f64 {
        self.0
    }
}

/// Rounds to two decimals, halves away from zero.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

pub fn combine(
    home_fixtures: &[FixtureRecord],
    away_fixtures: &[FixtureRecord],
    h2h_fixtures: &[FixtureRecord],
    home_team: &str,
    away_team: &str,
    conceded: &mut dyn ConcededSource,
) -> [CombinedRow; INTERVAL_COUNT] {
    let home_avg = extract_interval_averages(home_fixtures.iter().chain(h2h_fixtures), home_team);
    let away_avg = extract_interval_averages(away_fixtures.iter().chain(h2h_fixtures), away_team);
    combine_averages(&home_avg, &away_avg, conceded)
}

/// Zips two interval profiles into chart rows. Both inputs are indexed by interval, so
/// position `i` always refers to the same bucket on either side.
pub fn combine_averages(
    home: &[IntervalAverage; INTERVAL_COUNT],
    away: &[IntervalAverage; INTERVAL_COUNT],
    conceded: &mut dyn ConcededSource,
) -> [CombinedRow; INTERVAL_COUNT] {
    Interval::ALL.map(|interval| {
        let idx = interval.index();
        CombinedRow {
            interval: interval.label(),
            scored_home: round2(home[idx].avg),
            conceded_home: round2(conceded.conceded(Side::Home, interval)),
            scored_away: round2(away[idx].avg),
            conceded_away: round2(conceded.conceded(Side::Away, interval)),
        }
    })
}
