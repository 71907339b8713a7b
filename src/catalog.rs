use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSelection {
    pub id: u32,
    pub home: String,
    pub away: String,
    pub date: NaiveDate,
}

impl MatchSelection {
    pub fn title(&self) -> String {
        format!("{} - {} vs {}", self.date.format("%Y-%m-%d"), self.home, self.away)
    }
}

/// Fixed list of selectable matches. Built once at startup and handed to whoever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCatalog {
    matches: Vec<MatchSelection>,
}

impl MatchCatalog {
    pub fn new(matches: Vec<MatchSelection>) -> Result<Self> {
        if matches.is_empty() {
            return Err(anyhow!("match catalog is empty"));
        }
        let mut ids: Vec<u32> = matches.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(anyhow!("match catalog has duplicate ids"));
        }
        Ok(Self { matches })
    }

    pub fn builtin() -> Self {
        let entry = |id, home: &str, away: &str, (y, m, d)| MatchSelection {
            id,
            home: home.to_string(),
            away: away.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        };
        Self {
            matches: vec![
                entry(1, "Southampton", "Aston Villa", (2025, 4, 12)),
                entry(2, "Manchester United", "Chelsea", (2025, 4, 13)),
                entry(3, "Liverpool", "Arsenal", (2025, 4, 14)),
            ],
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let matches: Vec<MatchSelection> =
            serde_json::from_str(raw.trim()).context("invalid match catalog json")?;
        Self::new(matches)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed reading match catalog {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn matches(&self) -> &[MatchSelection] {
        &self.matches
    }

    pub fn get(&self, idx: usize) -> Option<&MatchSelection> {
        self.matches.get(idx)
    }

    pub fn find(&self, id: u32) -> Option<&MatchSelection> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
