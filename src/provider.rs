use std::thread;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::config::ProviderConfig;
use crate::fixtures::{FixtureRecord, fixtures_from_value};
use crate::http_client::http_client;
use crate::interval::Interval;

const API_KEY_HEADER: &str = "x-apisports-key";
const RETRY_BASE_DELAY: Duration = Duration::from_millis(250);
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured")]
    MissingKey,
    #[error("request failed: {0}")]
    Http(String),
    #[error("http {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider reported errors: {0}")]
    Api(String),
    #[error("invalid response: {0}")]
    Parse(String),
    #[error("client unavailable: {0}")]
    Client(String),
}

impl ProviderError {
    /// Transport failures, throttling and server errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(_) => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Source of raw fixture records. Implementations must be shareable across the fan-out.
pub trait FixtureProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// The team's most recent `last` fixtures.
    fn recent_fixtures(&self, team: &str, last: u8) -> Result<Vec<FixtureRecord>, ProviderError>;

    /// Past meetings between the two teams.
    fn head_to_head(&self, home: &str, away: &str) -> Result<Vec<FixtureRecord>, ProviderError>;
}

/// Runs `op` up to `retries + 1` times, backing off exponentially between retryable
/// failures.
pub fn with_retry<T, F>(mut op: F, retries: u32, base_delay: Duration) -> Result<T, ProviderError>
where
    F: FnMut() -> Result<T, ProviderError>,
{
    let mut attempt = 0u32;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < retries => {
                let delay = base_delay.saturating_mul(2u32.saturating_pow(attempt));
                attempt += 1;
                thread::sleep(delay);
            }
            Err(err) => return Err(err),
        }
    }
}

pub struct ApiFootballProvider {
    client: &'static Client,
    base_url: String,
    api_key: String,
    retries: u32,
}

impl ApiFootballProvider {
    pub fn new(cfg: &ProviderConfig) -> Result<Self, ProviderError> {
        let api_key = cfg.api_key.clone().ok_or(ProviderError::MissingKey)?;
        let client =
            http_client(cfg.timeout).map_err(|err| ProviderError::Client(format!("{err:#}")))?;
        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
            api_key,
            retries: cfg.retries,
        })
    }

    fn get_fixtures(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<FixtureRecord>, ProviderError> {
        let url = format!("{}{path}", self.base_url);
        let body = with_retry(
            || {
                let resp = self
                    .client
                    .get(&url)
                    .header(API_KEY_HEADER, &self.api_key)
                    .query(query)
                    .send()
                    .map_err(|err| ProviderError::Http(err.to_string()))?;
                let status = resp.status();
                let body = resp
                    .text()
                    .map_err(|err| ProviderError::Http(err.to_string()))?;
                if status != StatusCode::OK {
                    return Err(ProviderError::Status {
                        status: status.as_u16(),
                        body: truncate_body(&body),
                    });
                }
                Ok(body)
            },
            self.retries,
            RETRY_BASE_DELAY,
        )?;
        parse_envelope(&body)
    }
}

impl FixtureProvider for ApiFootballProvider {
    fn name(&self) -> &'static str {
        "api-football"
    }

    fn recent_fixtures(&self, team: &str, last: u8) -> Result<Vec<FixtureRecord>, ProviderError> {
        self.get_fixtures(
            "/fixtures",
            &[("team", team.to_string()), ("last", last.to_string())],
        )
    }

    fn head_to_head(&self, home: &str, away: &str) -> Result<Vec<FixtureRecord>, ProviderError> {
        self.get_fixtures("/fixtures/headtohead", &[("h2h", format!("{home}-{away}"))])
    }
}

/// Error pages can be whole HTML documents; only the head of the body is kept for the log.
fn truncate_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Decodes an API-Football envelope. A non-empty `errors` member fails the whole query;
/// a missing `response` is an empty result.
pub fn parse_envelope(raw: &str) -> Result<Vec<FixtureRecord>, ProviderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let root: Value =
        serde_json::from_str(trimmed).map_err(|err| ProviderError::Parse(err.to_string()))?;
    if !root.is_object() {
        return Err(ProviderError::Parse("expected a json object".to_string()));
    }
    if let Some(errors) = root.get("errors") {
        let reported = match errors {
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::String(s) => !s.trim().is_empty(),
            _ => false,
        };
        if reported {
            return Err(ProviderError::Api(errors.to_string()));
        }
    }
    Ok(fixtures_from_value(&root))
}

/// Offline provider that synthesizes plausible fixtures. The same seed and team always
/// produce the same records.
pub struct DemoProvider {
    seed: u64,
}

impl DemoProvider {
    const H2H_FIXTURES: usize = 3;

    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, key: &str) -> StdRng {
        // FNV-1a keeps the stream stable across builds.
        let mut hash: u64 = 0xcbf29ce484222325;
        for byte in key.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x100000001b3);
        }
        StdRng::seed_from_u64(self.seed ^ hash)
    }
}

impl FixtureProvider for DemoProvider {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn recent_fixtures(&self, team: &str, last: u8) -> Result<Vec<FixtureRecord>, ProviderError> {
        let mut rng = self.rng_for(team);
        let docs: Vec<Value> = (0..usize::from(last))
            .map(|idx| demo_fixture(&mut rng, idx as u64 + 1, &[team, "Opponent"]))
            .collect();
        Ok(fixtures_from_value(&Value::Array(docs)))
    }

    fn head_to_head(&self, home: &str, away: &str) -> Result<Vec<FixtureRecord>, ProviderError> {
        let mut rng = self.rng_for(&format!("{home}-{away}"));
        let docs: Vec<Value> = (0..Self::H2H_FIXTURES)
            .map(|idx| demo_fixture(&mut rng, 1000 + idx as u64, &[home, away]))
            .collect();
        Ok(fixtures_from_value(&Value::Array(docs)))
    }
}

fn demo_fixture(rng: &mut StdRng, id: u64, teams: &[&str]) -> Value {
    // Roughly one fixture in six comes back without a detailed breakdown.
    if rng.gen_bool(1.0 / 6.0) {
        return json!({ "fixture": { "id": id } });
    }
    let statistics: Vec<Value> = teams
        .iter()
        .map(|team| {
            let mut goals = Map::new();
            for interval in Interval::ALL {
                let total = if rng.gen_bool(0.1) {
                    Value::Null
                } else {
                    let weights = [0.72, 0.22, 0.06];
                    let roll: f64 = rng.r#gen();
                    let count = if roll < weights[0] {
                        0
                    } else if roll < weights[0] + weights[1] {
                        1
                    } else {
                        2
                    };
                    json!(count)
                };
                goals.insert(interval.provider_key().to_string(), json!({ "total": total }));
            }
            json!({
                "team": { "name": team },
                "statistics": { "goals": goals }
            })
        })
        .collect();
    json!({ "fixture": { "id": id }, "statistics": statistics })
}
