use crate::catalog::MatchSelection;
use crate::combine::{CombinedRow, ConcededSource, combine_averages};
use crate::extract::collect_samples;
use crate::fixtures::FixtureRecord;
use crate::interval::{INTERVAL_COUNT, Interval};
use crate::provider::{FixtureProvider, ProviderError};

/// Raw provider results for one selection, joined.
#[derive(Debug, Clone, Default)]
pub struct MatchPools {
    pub home: Vec<FixtureRecord>,
    pub away: Vec<FixtureRecord>,
    pub h2h: Vec<FixtureRecord>,
}

#[derive(Debug, Clone)]
pub struct IntervalProfile {
    pub rows: [CombinedRow; INTERVAL_COUNT],
    pub home_fixtures: usize,
    pub away_fixtures: usize,
    pub h2h_fixtures: usize,
    /// Stat entries that contributed samples, per side.
    pub home_samples: usize,
    pub away_samples: usize,
}

/// Issues the three provider queries concurrently and waits for all of them. Any single
/// failure fails the whole fetch.
pub fn fetch_pools(
    provider: &dyn FixtureProvider,
    selection: &MatchSelection,
    last: u8,
) -> Result<MatchPools, ProviderError> {
    let (home, (away, h2h)) = rayon::join(
        || provider.recent_fixtures(&selection.home, last),
        || {
            rayon::join(
                || provider.recent_fixtures(&selection.away, last),
                || provider.head_to_head(&selection.home, &selection.away),
            )
        },
    );
    Ok(MatchPools {
        home: home?,
        away: away?,
        h2h: h2h?,
    })
}

pub fn build_profile(
    pools: &MatchPools,
    selection: &MatchSelection,
    conceded: &mut dyn ConcededSource,
) -> IntervalProfile {
    let home = collect_samples(pools.home.iter().chain(&pools.h2h), &selection.home);
    let away = collect_samples(pools.away.iter().chain(&pools.h2h), &selection.away);
    let rows = combine_averages(&home.averages(), &away.averages(), conceded);

    // Every contributing entry adds exactly one sample to each interval.
    IntervalProfile {
        rows,
        home_fixtures: pools.home.len(),
        away_fixtures: pools.away.len(),
        h2h_fixtures: pools.h2h.len(),
        home_samples: home.count(Interval::Min0To15),
        away_samples: away.count(Interval::Min0To15),
    }
}

pub fn compute_profile(
    provider: &dyn FixtureProvider,
    selection: &MatchSelection,
    last: u8,
    conceded: &mut dyn ConcededSource,
) -> Result<IntervalProfile, ProviderError> {
    let pools = fetch_pools(provider, selection, last)?;
    Ok(build_profile(&pools, selection, conceded))
}
