//! Terminal UI
//!
//! A thin adapter over the Workbench:
//! - Code is typed into the editor pane
//! - Commands start with "/" and go in the command bar
//! - F5 analyzes, F2 cycles the mode, Ctrl+C exits
//!
//! The result pane projects the rendered Document; nothing here decides
//! what a response means.

pub mod handlers;
pub mod input;
pub mod state;
pub mod view;

// Re-exports
pub use input::{parse_command, render_help, Command};
pub use state::{App, AppState, ConsoleMessage, Focus};
pub use view::{document_lines, render, Palette};
