//! memento-notify — fires event reminders without the TUI running.
//!
//! Loads the same events file as the TUI, polls it for changes, and runs
//! the reminder engine against the desktop notification service. Meant to
//! be started from a session autostart file or a user service.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use clap::Parser;
use log::{info, warn};

use memento_core::{DesktopNotifier, EventStore, MementoConfig, ReminderEngine};

#[derive(Parser)]
#[command(
    name = "memento-notify",
    about = "Desktop notification daemon for memento reminders"
)]
struct Args {
    /// Events file to watch instead of the configured one
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Seconds between checks for changes to the events file
    #[arg(long, default_value_t = 30)]
    poll_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = MementoConfig::load()?;
    let events_path = args.file.unwrap_or_else(|| config.events_path());

    info!("Watching {}", events_path.display());
    let mut store = EventStore::load(&events_path);
    info!("Loaded {} events", store.events().len());

    let notifier = DesktopNotifier::new();
    if let Err(e) = notifier.probe() {
        warn!("Desktop notifications unavailable: {e}");
    }

    let engine = tokio::spawn(ReminderEngine::new(store.watch(), notifier).run());

    let poll_interval = Duration::from_secs(args.poll_interval.max(1));
    let mut last_modified = modified_time(&events_path);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
            _ = tokio::time::sleep(poll_interval) => {
                let modified = modified_time(&events_path);
                if modified != last_modified {
                    last_modified = modified;
                    store.reload();
                    info!("Events file changed, reloaded {} events", store.events().len());
                }
            }
        }
    }

    // Dropping the store ends the engine task.
    drop(store);
    engine.await?;

    Ok(())
}

/// The file's mtime; `None` while it does not exist yet.
fn modified_time(path: &std::path::Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
