use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::combine::ConcededSource;
use crate::export;
use crate::pipeline;
use crate::provider::FixtureProvider;
use crate::state::{Delta, ProviderCommand};

const FAN_OUT_THREADS: usize = 3;

pub struct FeedContext {
    pub provider: Arc<dyn FixtureProvider>,
    pub conceded: Box<dyn ConcededSource + Send>,
    pub last: u8,
    pub export_dir: PathBuf,
}

pub fn spawn_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    ctx: FeedContext,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_provider(&tx, &cmd_rx, ctx))
}

/// Serves commands until the command channel closes. Fetch requests that were
/// superseded while waiting in the queue are skipped.
pub fn run_provider(tx: &Sender<Delta>, cmd_rx: &Receiver<ProviderCommand>, mut ctx: FeedContext) {
    let pool = build_fetch_pool();
    let _ = tx.send(Delta::Log(format!(
        "[INFO] Fixture provider: {}",
        ctx.provider.name()
    )));

    while let Ok(first) = cmd_rx.recv() {
        let mut pending = vec![first];
        while let Ok(cmd) = cmd_rx.try_recv() {
            pending.push(cmd);
        }

        for cmd in coalesce_commands(pending) {
            match cmd {
                ProviderCommand::FetchProfile {
                    generation,
                    selection,
                } => {
                    let provider = ctx.provider.as_ref();
                    let fetched = with_fetch_pool(&pool, || {
                        pipeline::fetch_pools(provider, &selection, ctx.last)
                    });
                    match fetched {
                        Ok(pools) => {
                            let profile =
                                pipeline::build_profile(&pools, &selection, ctx.conceded.as_mut());
                            let _ = tx.send(Delta::Log(format!(
                                "[INFO] {}: {}+{} fixtures ({} samples), {}: {}+{} fixtures ({} samples)",
                                selection.home,
                                profile.home_fixtures,
                                profile.h2h_fixtures,
                                profile.home_samples,
                                selection.away,
                                profile.away_fixtures,
                                profile.h2h_fixtures,
                                profile.away_samples,
                            )));
                            let _ = tx.send(Delta::SetProfile {
                                generation,
                                match_id: selection.id,
                                profile,
                            });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::FetchFailed {
                                generation,
                                error: err.to_string(),
                            });
                        }
                    }
                }
                ProviderCommand::Export { selection, rows } => {
                    match export::export_profile(&ctx.export_dir, &selection, &rows) {
                        Ok(path) => {
                            let _ = tx.send(Delta::Exported {
                                path: path.display().to_string(),
                            });
                        }
                        Err(err) => {
                            let _ = tx.send(Delta::ExportFailed {
                                error: format!("{err:#}"),
                            });
                        }
                    }
                }
            }
        }
    }
}

/// Keeps every export and only the newest fetch, preserving queue order otherwise.
pub fn coalesce_commands(pending: Vec<ProviderCommand>) -> Vec<ProviderCommand> {
    let newest = pending.iter().filter_map(|cmd| cmd.generation()).max();
    pending
        .into_iter()
        .filter(|cmd| match cmd.generation() {
            Some(generation) => Some(generation) == newest,
            None => true,
        })
        .collect()
}

fn build_fetch_pool() -> Option<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(FAN_OUT_THREADS)
        .build()
        .ok()
}

fn with_fetch_pool<T>(pool: &Option<rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool.as_ref() {
        pool.install(action)
    } else {
        action()
    }
}
