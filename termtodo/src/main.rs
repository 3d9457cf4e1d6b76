//! `termtodo`: terminal todo list with an append-only archive.
//!
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/termtodo/config.toml`).
//!
//! ```bash
//! # Default database under the user data directory
//! cargo run --bin termtodo
//!
//! # Explicit database, or a throwaway in-memory one
//! cargo run --bin termtodo -- --db ./todos.db
//! cargo run --bin termtodo -- --in-memory
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use termtodo::app::App;
use termtodo::config::{AppConfig, CliArgs, StorageLocation};
use termtodo::ui;
use termtodo_store::TaskStore;

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match AppConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            AppConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    match &config.storage {
        StorageLocation::File(path) => {
            tracing::info!(db = %path.display(), "termtodo starting");
        }
        StorageLocation::InMemory => tracing::info!(db = "memory", "termtodo starting"),
    }

    // Open the store before touching the terminal so errors print normally.
    let app = match config.open_store().and_then(App::new) {
        Ok(app) => app.with_timestamp_format(config.timestamp_format.clone()),
        Err(e) => {
            tracing::error!(error = %e, "failed to open todo store");
            eprintln!("Error: failed to open todo store: {e}");
            std::process::exit(1);
        }
    };

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, app, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("termtodo exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("termtodo.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop: draw, wait for a key, dispatch, repeat.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<TaskStore>,
    config: &AppConfig,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            // Only handle key press events (not release/repeat).
            if key.kind == KeyEventKind::Press {
                app.handle_key_event(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
