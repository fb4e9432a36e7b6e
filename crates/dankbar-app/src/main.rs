use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use dankbar_config::{config_dir, Selection, Settings};
use dankbar_core::{cycle::Cycle, emitter::StreamEmitter, logging};
use dankbar_providers::default_registry;

/// Load settings and selection from `dir` and bind them to the built-in
/// providers. Every configuration error surfaces here, before the stream
/// header is written.
fn build_cycle(dir: &Path) -> Result<Cycle> {
    let settings = Settings::load(dir)?;
    let selection = Selection::load_or_bootstrap(dir)?;
    let registry = default_registry(&settings)?;
    let interval = Duration::from_secs(settings.interval_secs);

    let cycle = Cycle::new(registry, &selection.names, interval)
        .with_context(|| format!("invalid selection in {}", dir.display()))?;

    tracing::info!(
        config_dir = %dir.display(),
        providers = ?cycle.selection(),
        interval_secs = settings.interval_secs,
        wifi_timeout_ms = ?settings.wifi.timeout_ms,
        "selection resolved"
    );
    Ok(cycle)
}

/// Record a stop request. Returns `true` when one was already pending.
fn request_stop(stop: &AtomicBool) -> bool {
    stop.swap(true, Ordering::SeqCst)
}

fn main() -> Result<()> {
    logging::init();
    tracing::info!("dankbar starting up");

    let dir = config_dir();
    let cycle = match build_cycle(&dir) {
        Ok(cycle) => cycle,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "startup failed");
            return Err(err);
        }
    };

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        // A second signal exits at once, even mid-cycle.
        ctrlc::set_handler(move || {
            if request_stop(&stop) {
                std::process::exit(130);
            }
        })
        .context("failed to install signal handler")?;
    }

    let mut emitter = StreamEmitter::new(io::stdout().lock());
    let res = cycle
        .run(&mut emitter, &stop)
        .context("failed to write status stream");
    if let Err(err) = &res {
        tracing::error!(error = %format!("{err:#}"), "stream ended");
    }
    res
}
