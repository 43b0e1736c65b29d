//! `Tasklist`: terminal client for a remote todo list service.
//!
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/tasklist/config.toml`).
//!
//! ```bash
//! # Against the default service at http://localhost:5000/api
//! cargo run --bin tasklist
//!
//! # Against the in-memory stub
//! cargo run --bin tasklist-stub -- --bind 127.0.0.1:5050 &
//! cargo run --bin tasklist -- --api-url http://127.0.0.1:5050/api
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use tasklist::app::App;
use tasklist::client::{HttpTodoApi, RemoteError};
use tasklist::config::{CliArgs, ClientConfig};
use tasklist::controller::{Controller, Settlement, Ticket};
use tasklist::net::{self, NetCommand, NetEvent};
use tasklist::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    // Fail before the alternate screen hides the message.
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(base_url = %config.base_url, "tasklist starting");

    // Build the HTTP client before taking over the terminal so errors stay visible.
    let api = match config.build_api() {
        Ok(api) => api,
        Err(e) => {
            eprintln!("Error: {e}");
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
    let result = run_app(&mut terminal, api, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("tasklist exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("tasklist.log");
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

/// Main application loop.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: HttpTodoApi,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(Controller::with_stale_results(config.stale_results));
    let (cmd_tx, mut evt_rx) = net::spawn_net(Arc::new(api), &config.to_net_config());

    // Initial load.
    let initial = app.controller.refresh();
    dispatch(&mut app, &cmd_tx, initial);

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Drain all pending NetEvents (non-blocking).
        drain_net_events(&mut app, &mut evt_rx);

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(ticket) = app.handle_key_event(key) {
                dispatch(&mut app, &cmd_tx, ticket);
            }
        }

        if app.should_quit {
            // Send shutdown command to networking tasks.
            let _ = cmd_tx.try_send(NetCommand::Shutdown);
            return Ok(());
        }
    }
}

/// Hand a ticket to the networking task.
///
/// A ticket that cannot be queued is settled as a failure right away so the
/// loading flag and error line stay consistent.
fn dispatch(app: &mut App, tx: &mpsc::Sender<NetCommand>, ticket: Ticket) {
    let (cmd, reason) = match tx.try_send(NetCommand::Dispatch(ticket)) {
        Ok(()) => return,
        Err(mpsc::error::TrySendError::Full(cmd)) => (cmd, "network busy"),
        Err(mpsc::error::TrySendError::Closed(cmd)) => (cmd, "network task stopped"),
    };
    tracing::warn!(reason, "request not dispatched");
    if let NetCommand::Dispatch(ticket) = cmd {
        app.apply_settlement(Settlement::failed(
            ticket,
            RemoteError::Unavailable(reason.to_string()),
        ));
    }
}

/// Drain all pending `NetEvent`s from the receiver and apply them to the app.
fn drain_net_events(app: &mut App, rx: &mut mpsc::Receiver<NetEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event {
            NetEvent::Settled(settlement) => app.apply_settlement(settlement),
        }
    }
}
