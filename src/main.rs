//! Compilab CLI
//!
//! - `compilab` / `compilab tui`: terminal UI
//! - `compilab analyze ...`: one request, printed to stdout
//! - `compilab examples ...`: catalog listing
//!
//! EXIT: Ctrl+C or /quit from the TUI at any time.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{poll, read, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use compilab::cli::{self, Args, Command, EXIT_CONFIG_ERROR};
use compilab::client::AnalysisClient;
use compilab::config::Config;
use compilab::theme::ThemeStore;
use compilab::ui::{handlers, state::AppState, App};
use compilab::workbench::Workbench;

/// Event loop tick
const TICK: Duration = Duration::from_millis(100);

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let state_dir = match cli::resolve_state_dir(args.state_dir.clone()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };
    if let Err(e) = cli::ensure_state_dir(&state_dir) {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_CONFIG_ERROR);
    }

    let config = match Config::resolve(&state_dir, args.backend.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    // Logging is best effort; the client works without it
    let log_guard = match compilab::logging::init(&config.logging, &config.log_path(&state_dir)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };
    tracing::info!(
        state_dir = %state_dir.display(),
        backend = %config.backend.url,
        "compilab starting"
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

    match args.command() {
        Command::Tui => run_tui_mode(&config, &state_dir, &runtime),
        command => {
            let exit_code = cli::run_cli_mode(command, &config, &runtime);
            drop(log_guard);
            std::process::exit(exit_code);
        }
    }
}

/// Run TUI mode
fn run_tui_mode(
    config: &Config,
    state_dir: &Path,
    runtime: &tokio::runtime::Runtime,
) -> anyhow::Result<()> {
    let client =
        AnalysisClient::from_config(&config.backend).context("failed to create HTTP client")?;
    let workbench = Workbench::with_theme_store(client.base_url(), ThemeStore::new(state_dir));
    let mut app = App::new(workbench, Arc::new(client), runtime.handle().clone());
    app.log(format!("Compilab · servidor {}", config.backend.url));
    app.log("F5 analiza · F2 cambia de modo · Tab para comandos · /help");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Cleanup runs even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("compilab exiting");
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> anyhow::Result<()> {
    while app.state() != AppState::Quitting {
        compilab::ui::render(terminal, app)?;

        if poll(TICK)? {
            if let Event::Key(key) = read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Ctrl+C exits immediately, even with a request in flight
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }

                handlers::handle_key_event(app, key);
            }
        }

        // Apply finished requests; next render shows them
        app.process_analysis_events();
        app.expire_toast();
    }
    Ok(())
}
