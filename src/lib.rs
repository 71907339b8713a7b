pub mod catalog;
pub mod combine;
pub mod config;
pub mod export;
pub mod extract;
pub mod feed;
pub mod fixtures;
pub mod http_client;
pub mod interval;
pub mod pipeline;
pub mod provider;
pub mod state;

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::provider::{ApiFootballProvider, DemoProvider, FixtureProvider};

const DEFAULT_DEMO_SEED: u64 = 2025;

/// Picks the HTTP provider when an API key is configured, the demo provider otherwise.
/// The second value explains the choice for the console.
pub fn select_provider(
    cfg: &ProviderConfig,
    demo_seed: Option<u64>,
) -> (Arc<dyn FixtureProvider>, Option<String>) {
    if cfg.api_key.is_none() {
        let seed = demo_seed.unwrap_or(DEFAULT_DEMO_SEED);
        return (
            Arc::new(DemoProvider::new(seed)),
            Some("[INFO] API_FOOTBALL_KEY not set, using demo fixtures".to_string()),
        );
    }
    match ApiFootballProvider::new(cfg) {
        Ok(provider) => (Arc::new(provider), None),
        Err(err) => (
            Arc::new(DemoProvider::new(demo_seed.unwrap_or(DEFAULT_DEMO_SEED))),
            Some(format!("[WARN] API provider unavailable ({err}), using demo fixtures")),
        ),
    }
}
