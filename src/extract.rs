use crate::fixtures::FixtureRecord;
use crate::interval::{INTERVAL_COUNT, Interval};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalAverage {
    pub interval: Interval,
    pub avg: f64,
}

/// Sample sequences per interval, built up fixture by fixture.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalSamples {
    samples: [Vec<f64>; INTERVAL_COUNT],
}

impl IntervalSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one sample per interval for every stat entry of `team_name` that carries a
    /// goals breakdown. Entries for other teams, or without goals, add nothing.
    pub fn add_fixture(&mut self, fixture: &FixtureRecord, team_name: &str) {
        for entry in &fixture.statistics {
            if !entry.is_team(team_name) {
                continue;
            }
            let Some(goals) = entry.goals.as_ref() else {
                continue;
            };
            for interval in Interval::ALL {
                self.samples[interval.index()].push(goals.sample(interval));
            }
        }
    }

    pub fn count(&self, interval: Interval) -> usize {
        self.samples[interval.index()].len()
    }

    pub fn mean(&self, interval: Interval) -> f64 {
        let values = &self.samples[interval.index()];
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    pub fn averages(&self) -> [IntervalAverage; INTERVAL_COUNT] {
        Interval::ALL.map(|interval| IntervalAverage {
            interval,
            avg: self.mean(interval),
        })
    }
}

pub fn collect_samples<'a, I>(fixtures: I, team_name: &str) -> IntervalSamples
where
    I: IntoIterator<Item = &'a FixtureRecord>,
{
    let mut samples = IntervalSamples::new();
    for fixture in fixtures {
        samples.add_fixture(fixture, team_name);
    }
    samples
}

/// Average goals per interval for `team_name` across `fixtures`. Always six entries in
/// interval order; intervals without samples average to zero.
pub fn extract_interval_averages<'a, I>(
    fixtures: I,
    team_name: &str,
) -> [IntervalAverage; INTERVAL_COUNT]
where
    I: IntoIterator<Item = &'a FixtureRecord>,
{
    collect_samples(fixtures, team_name).averages()
}
