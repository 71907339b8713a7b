use anyhow::{Context, Result};
use serde_json::Value;

use crate::interval::{INTERVAL_COUNT, Interval};

/// One past match as returned by the fixture provider. Only `statistics` feeds the
/// aggregation; id and date are carried for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureRecord {
    pub id: Option<u64>,
    pub date: Option<String>,
    pub statistics: Vec<TeamStatEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamStatEntry {
    pub team_name: Option<String>,
    /// `None` when the provider had no goals-by-minute breakdown for this team.
    pub goals: Option<IntervalGoals>,
}

impl TeamStatEntry {
    pub fn is_team(&self, team_name: &str) -> bool {
        self.team_name.as_deref() == Some(team_name)
    }
}

/// Per-interval goal totals. A slot is `None` when the provider sent `null`, omitted the
/// interval, or sent something that is not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntervalGoals {
    totals: [Option<f64>; INTERVAL_COUNT],
}

impl IntervalGoals {
    pub fn total(&self, interval: Interval) -> Option<f64> {
        self.totals[interval.index()]
    }

    /// Sample value for the interval; missing data counts as zero goals.
    pub fn sample(&self, interval: Interval) -> f64 {
        self.total(interval).unwrap_or(0.0)
    }
}

/// Parses a provider envelope (`{"response": [...]}`) or a bare array of fixtures.
/// `null` and empty bodies yield no fixtures.
pub fn parse_fixtures_json(raw: &str) -> Result<Vec<FixtureRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid fixtures json")?;
    Ok(fixtures_from_value(&root))
}

pub fn fixtures_from_value(root: &Value) -> Vec<FixtureRecord> {
    let items = match root {
        Value::Array(items) => items.as_slice(),
        _ => root
            .get("response")
            .and_then(|v| v.as_array())
            .map(|v| v.as_slice())
            .unwrap_or_default(),
    };
    items.iter().map(parse_fixture_record).collect()
}

pub fn parse_fixture_record(v: &Value) -> FixtureRecord {
    let fixture = v.get("fixture");
    let id = fixture.and_then(|f| f.get("id")).and_then(|x| x.as_u64());
    let date = fixture
        .and_then(|f| f.get("date"))
        .and_then(|x| x.as_str())
        .map(|s| s.to_string());

    let statistics = v
        .get("statistics")
        .and_then(|x| x.as_array())
        .map(|arr| arr.iter().map(parse_team_stat_entry).collect())
        .unwrap_or_default();

    FixtureRecord {
        id,
        date,
        statistics,
    }
}

pub fn parse_team_stat_entry(v: &Value) -> TeamStatEntry {
    let team_name = v
        .get("team")
        .and_then(|t| t.get("name"))
        .and_then(|x| x.as_str())
        .map(|s| s.to_string());
    let goals = v
        .get("statistics")
        .and_then(|s| s.get("goals"))
        .and_then(parse_interval_goals);
    TeamStatEntry { team_name, goals }
}

fn parse_interval_goals(v: &Value) -> Option<IntervalGoals> {
    let map = v.as_object()?;
    let mut totals = [None; INTERVAL_COUNT];
    for (key, bucket) in map {
        let Some(interval) = Interval::from_key(key) else {
            continue;
        };
        let slot = &mut totals[interval.index()];
        // First spelling wins if a document carries both `0'-15'` and `0-15`.
        if slot.is_none() {
            *slot = bucket.get("total").and_then(number_value);
        }
    }
    Some(IntervalGoals { totals })
}

fn number_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64().filter(|x| x.is_finite()),
        _ => None,
    }
}
