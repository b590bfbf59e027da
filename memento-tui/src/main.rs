//! memento — terminal UI for personal event reminders.

mod app;
mod event;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::prelude::*;

use memento_core::{DesktopNotifier, EventStore, MementoConfig, ReminderEngine};

use crate::app::App;
use crate::event::{map_key_event, Event, EventHandler};

/// TUI refresh rate
const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "memento", about = "Personal event reminders in the terminal")]
struct Args {
    /// Events file to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = MementoConfig::load()?;
    let events_path = args.file.unwrap_or_else(|| config.events_path());

    info!("Using events file {}", events_path.display());
    let store = EventStore::load(events_path);
    let mut app = App::new(store);

    // Probe once; keep scheduling even when it fails.
    let notifier = DesktopNotifier::new();
    if let Err(e) = notifier.probe() {
        warn!("Desktop notifications unavailable: {e}");
        app.notifications_available = false;
    }
    let engine = tokio::spawn(ReminderEngine::new(app.store.watch(), notifier).run());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(TICK_RATE);
    let result = run_app(&mut terminal, &mut app, &mut events).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Dropping the app drops the store, which ends the engine task.
    drop(app);
    engine.await?;

    if let Err(e) = result {
        error!("Application error: {e}");
        return Err(e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next().await {
            Some(Event::Key(key)) => {
                let action = map_key_event(key, &app.mode);
                app.apply(action);
            }
            Some(Event::Tick) => app.on_tick(),
            Some(Event::Resize(_, _)) => {
                // Redrawn on the next loop iteration.
            }
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
