use anyhow::{Context, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;

use goal_intervals::combine::RandomPlaceholder;
use goal_intervals::config::AppConfig;
use goal_intervals::export;
use goal_intervals::pipeline;

// Usage: interval_profile [match-id] [--json] [--export]
fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let mut match_id: Option<u32> = None;
    let mut as_json = false;
    let mut do_export = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => as_json = true,
            "--export" => do_export = true,
            other => {
                match_id = Some(
                    other
                        .parse()
                        .with_context(|| format!("invalid match id {other:?}"))?,
                )
            }
        }
    }

    let selection = match match_id {
        Some(id) => config
            .catalog
            .find(id)
            .ok_or_else(|| anyhow!("match {id} is not in the catalog"))?,
        None => config
            .catalog
            .get(0)
            .ok_or_else(|| anyhow!("match catalog is empty"))?,
    };

    let (provider, notice) = goal_intervals::select_provider(&config.provider, config.demo_seed);
    if let Some(notice) = notice {
        eprintln!("{notice}");
    }

    let mut conceded = match config.demo_seed {
        Some(seed) => RandomPlaceholder::new(StdRng::seed_from_u64(seed)),
        None => RandomPlaceholder::new(StdRng::from_entropy()),
    };
    let profile = pipeline::compute_profile(
        provider.as_ref(),
        selection,
        config.provider.last,
        &mut conceded,
    )
    .with_context(|| format!("fixture fetch failed for {}", selection.title()))?;

    eprintln!(
        "[INFO] {} fixtures: {} home, {} away, {} h2h",
        provider.name(),
        profile.home_fixtures,
        profile.away_fixtures,
        profile.h2h_fixtures
    );

    if as_json {
        println!("{}", serde_json::to_string_pretty(&profile.rows)?);
    } else {
        println!("{}", selection.title());
        println!(
            "{:<8}{:>10}{:>12}{:>10}{:>12}",
            "Min", "H scored", "H conc.*", "A scored", "A conc.*"
        );
        for row in &profile.rows {
            println!(
                "{:<8}{:>10.2}{:>12.2}{:>10.2}{:>12.2}",
                row.interval,
                row.scored_home,
                row.conceded_home,
                row.scored_away,
                row.conceded_away
            );
        }
        println!("* conceded columns are placeholder values");
    }

    if do_export {
        let path = export::export_profile(&config.export_dir, selection, &profile.rows)?;
        eprintln!("[INFO] Exported {}", path.display());
    }
    Ok(())
}
