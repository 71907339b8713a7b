use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::catalog::MatchCatalog;

pub const DEFAULT_BASE_URL: &str = "https://v3.football.api-sports.io";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// How many recent fixtures to request per team.
    pub last: u8,
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            last: 5,
            timeout: Duration::from_secs(10),
            retries: 2,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset, blank or unparsable values fall back
    /// to the defaults and numeric values are clamped to their ranges.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_key = lookup("API_FOOTBALL_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let base_url = lookup("API_FOOTBALL_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);
        let last = lookup("FIXTURES_LAST")
            .and_then(|val| val.trim().parse::<u32>().ok())
            .unwrap_or(u32::from(defaults.last))
            .clamp(1, 20);
        let timeout_secs = lookup("PROVIDER_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(defaults.timeout.as_secs())
            .clamp(1, 60);
        let retries = lookup("PROVIDER_RETRIES")
            .and_then(|val| val.trim().parse::<u32>().ok())
            .unwrap_or(defaults.retries)
            .min(5);

        Self {
            api_key,
            base_url,
            last: u8::try_from(last).unwrap_or(20),
            timeout: Duration::from_secs(timeout_secs),
            retries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub catalog: MatchCatalog,
    pub export_dir: PathBuf,
    pub demo_seed: Option<u64>,
}

impl AppConfig {
    /// Reads `.env.local`/`.env` (if present) and the process environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");

        let catalog = match env::var("MATCH_CATALOG").ok().filter(|s| !s.trim().is_empty()) {
            Some(path) => MatchCatalog::load(&PathBuf::from(path.trim()))?,
            None => MatchCatalog::builtin(),
        };
        let export_dir = env::var("EXPORT_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let demo_seed = env::var("DEMO_SEED")
            .ok()
            .and_then(|val| val.parse::<u64>().ok());

        Ok(Self {
            provider: ProviderConfig::from_env(),
            catalog,
            export_dir,
            demo_seed,
        })
    }
}
