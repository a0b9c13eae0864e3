//! TUI command and key handlers
//!
//! Every action goes through the workbench; handlers only translate input
//! and report results on the console.

use crate::ui::input::{parse_command, render_help, Command};
use crate::ui::state::{App, Focus};
use crate::workbench::WorkbenchError;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::{Path, PathBuf};

/// Lines moved per PageUp/PageDown
const PAGE_SCROLL: u16 = 10;

/// Execute a parsed command
pub fn execute_command(app: &mut App, cmd: Command) {
    match cmd {
        Command::None => {}
        Command::Quit => {
            app.log("Saliendo...");
            app.quit();
        }
        Command::Help => {
            for line in render_help().lines() {
                app.log(line.to_string());
            }
        }
        Command::Mode(mode) => {
            let change = app.set_mode(mode);
            app.log(format!("Modo: {}", change.current.label()));
        }
        Command::Run => run_analysis(app),
        Command::Example(n) => handle_example(app, n.unwrap_or(1)),
        Command::Random => {
            let entry = app.workbench.load_random_example();
            app.log(format!("Ejemplo cargado: {}", entry.title));
        }
        Command::Open(path) => handle_open(app, Path::new(&path)),
        Command::Clear => {
            app.workbench.clear();
            app.output_scroll = 0;
            app.log("Código y resultado limpiados");
        }
        Command::Save(dir) => {
            let dir = dir.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
            handle_save(app, &dir);
        }
        Command::Theme => app.toggle_theme(),
        Command::Invalid(usage) => app.log(format!("Uso: {}", usage)),
        Command::Unknown(text) => {
            app.log(format!("Comando desconocido: {} (usa /help)", text));
        }
    }
}

/// Start an analysis of the editor contents
pub fn run_analysis(app: &mut App) {
    match app.start_analysis() {
        Ok(request_id) => {
            tracing::debug!(request_id, "analysis dispatched from TUI");
            app.log(format!("Analizando ({})...", app.workbench.mode().label()));
        }
        Err(WorkbenchError::RequestInFlight(_)) => {
            app.log("Ya hay un análisis en curso");
        }
        Err(e) => app.log(format!("Error: {}", e)),
    }
}

/// Load the n-th (1-based) example of the active mode
pub fn handle_example(app: &mut App, n: usize) {
    let index = n.saturating_sub(1);
    match app.workbench.load_example(index) {
        Ok(entry) => {
            let title = entry.title;
            app.log(format!("Ejemplo cargado: {}", title));
        }
        Err(e) => app.log(format!("Error: {}", e)),
    }
}

pub fn handle_open(app: &mut App, path: &Path) {
    match app.workbench.load_file(path) {
        Ok(bytes) => app.log(format!("Archivo cargado: {} ({} bytes)", path.display(), bytes)),
        Err(e) => app.log(format!("Error al leer el archivo: {}", e)),
    }
}

pub fn handle_save(app: &mut App, dir: &Path) {
    match app.workbench.save_output(dir) {
        Ok(path) => app.log(format!("Resultado guardado en {}", path.display())),
        Err(e) => app.log(format!("Error al guardar: {}", e)),
    }
}

/// Route one key press
///
/// Ctrl+C is handled by the main loop before this is called.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::F(5) => run_analysis(app),
        KeyCode::F(2) => {
            let change = app.cycle_mode();
            app.log(format!("Modo: {}", change.current.label()));
        }
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.focus = Focus::Editor;
        }
        KeyCode::Enter => match app.focus {
            Focus::Editor => app.handle_newline(),
            Focus::CommandBar => {
                let input = app.take_command();
                execute_command(app, parse_command(&input));
            }
        },
        KeyCode::Backspace => app.handle_backspace(),
        KeyCode::PageUp => app.scroll_output_up(PAGE_SCROLL),
        KeyCode::PageDown => app.scroll_output_down(PAGE_SCROLL),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            // "/" in an empty editor starts a command
            if c == '/' && app.focus == Focus::Editor && app.workbench.input().is_empty() {
                app.focus = Focus::CommandBar;
            }
            app.handle_char(c);
        }
        _ => {}
    }
}
