//! Workbench: the state behind one analysis session
//!
//! Owns the active mode, the input buffer, the rendered output, the theme and
//! the single in-flight request slot. Front ends (TUI, headless CLI) drive it;
//! nothing here touches the terminal or the network.
//!
//! Request protocol:
//! 1. [`Workbench::start_analysis`] clears the output and hands out a
//!    [`Ticket`]. It is refused while another request is pending.
//! 2. The caller sends the ticket's request and later calls
//!    [`Workbench::settle`] with the request id and the outcome.
//! 3. If the mode changed since the request started, the result is
//!    discarded. The pending slot is freed either way.

use crate::file_tools::{self, FileReadError, FileWriteError};
use crate::theme::{Theme, ThemeError, ThemeStore};
use compilab_core::catalog::{self, ExampleEntry, ExampleError};
use compilab_core::{render_outcome, AnalysisRequest, Document, Mode, ModeChange, ModeState, Outcome};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("An analysis request is already in flight (request {0})")]
    RequestInFlight(u64),

    #[error(transparent)]
    Example(#[from] ExampleError),

    #[error(transparent)]
    FileRead(#[from] FileReadError),

    #[error(transparent)]
    FileWrite(#[from] FileWriteError),

    #[error(transparent)]
    Theme(#[from] ThemeError),
}

pub type Result<T> = std::result::Result<T, WorkbenchError>;

/// Permission to send one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub request_id: u64,
    pub request: AnalysisRequest,
}

/// What `settle` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleResult {
    /// Outcome rendered into the output
    Rendered,
    /// Mode changed while pending; outcome dropped
    DiscardedStale,
    /// Not the pending request; nothing changed
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    request_id: u64,
    mode: Mode,
}

#[derive(Debug)]
pub struct Workbench {
    mode: ModeState,
    input: String,
    output: Document,
    pending: Option<Pending>,
    next_request_id: u64,
    backend_url: String,
    theme: Theme,
    theme_store: Option<ThemeStore>,
}

impl Workbench {
    /// Fresh workbench with no persisted theme
    pub fn new(backend_url: &str) -> Self {
        Self {
            mode: ModeState::new(),
            input: String::new(),
            output: Document::new(),
            pending: None,
            next_request_id: 1,
            backend_url: backend_url.to_string(),
            theme: Theme::default(),
            theme_store: None,
        }
    }

    /// Workbench whose theme is loaded from, and saved to, `store`
    pub fn with_theme_store(backend_url: &str, store: ThemeStore) -> Self {
        let theme = store.load();
        Self {
            theme,
            theme_store: Some(store),
            ..Self::new(backend_url)
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode.current_mode()
    }

    /// Switch mode; the displayed output is always cleared
    pub fn set_mode(&mut self, mode: Mode) -> ModeChange {
        let change = self.mode.set_mode(mode);
        if change.clear_output {
            self.output.clear();
        }
        change
    }

    pub fn cycle_mode(&mut self) -> ModeChange {
        let next = self.mode().next();
        self.set_mode(next)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn output(&self) -> &Document {
        &self.output
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Replace the input with the `index`-th (0-based) example of the active mode
    pub fn load_example(&mut self, index: usize) -> Result<&'static ExampleEntry> {
        let entry = catalog::pick_example(self.mode(), index)?;
        self.input = entry.code.to_string();
        tracing::debug!(mode = %self.mode(), index, title = entry.title, "example loaded");
        Ok(entry)
    }

    pub fn load_random_example(&mut self) -> &'static ExampleEntry {
        let entry = catalog::pick_random_example(self.mode());
        self.input = entry.code.to_string();
        tracing::debug!(mode = %self.mode(), title = entry.title, "random example loaded");
        entry
    }

    /// Replace the input with a file's contents; returns the byte count
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let text = file_tools::file_read(path)?;
        let len = text.len();
        self.input = text;
        Ok(len)
    }

    /// Empty both the input and the output
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<u64> {
        self.pending.map(|p| p.request_id)
    }

    /// Reserve the request slot for the current input and mode
    pub fn start_analysis(&mut self) -> Result<Ticket> {
        if let Some(pending) = self.pending {
            tracing::debug!(pending = pending.request_id, "analysis refused: request in flight");
            return Err(WorkbenchError::RequestInFlight(pending.request_id));
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        let mode = self.mode();
        self.pending = Some(Pending { request_id, mode });
        self.output.clear();

        tracing::info!(request_id, mode = %mode, "analysis started");
        Ok(Ticket {
            request_id,
            request: AnalysisRequest::new(self.input.clone(), mode),
        })
    }

    /// Apply a finished request, rendered under the mode it was started in
    pub fn settle(&mut self, request_id: u64, outcome: &Outcome) -> SettleResult {
        let mode = match self.pending {
            Some(pending) if pending.request_id == request_id => pending.mode,
            _ => {
                tracing::debug!(request_id, "settle for unknown request ignored");
                return SettleResult::Ignored;
            }
        };
        self.pending = None;

        if mode != self.mode() {
            tracing::info!(
                request_id,
                origin = %mode,
                current = %self.mode(),
                "stale result discarded"
            );
            return SettleResult::DiscardedStale;
        }

        self.output = render_outcome(mode, outcome, &self.backend_url);
        SettleResult::Rendered
    }

    /// Write the displayed output to `<dir>/resultado.txt`
    pub fn save_output(&self, dir: &Path) -> Result<PathBuf> {
        Ok(file_tools::write_output(dir, &self.output.to_plain_text())?)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it
    ///
    /// The in-memory theme flips even when saving fails.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        if let Some(store) = &self.theme_store {
            store.save(self.theme)?;
        }
        tracing::info!(theme = %self.theme, "theme toggled");
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compilab_core::AnalysisResponse;

    const BACKEND: &str = "http://localhost:5000";

    fn lexical_success() -> Outcome {
        let body = r#"{"tokens": {"KEYWORD": []}, "counts": {"KEYWORD": 0}, "total_tokens": 0}"#;
        Outcome::Success {
            response: AnalysisResponse::from_json(Mode::Lexical, body).unwrap(),
        }
    }

    #[test]
    fn test_request_ids_increase() {
        let mut wb = Workbench::new(BACKEND);
        let first = wb.start_analysis().unwrap();
        wb.settle(first.request_id, &lexical_success());
        let second = wb.start_analysis().unwrap();
        assert!(second.request_id > first.request_id);
    }

    #[test]
    fn test_start_refused_while_pending() {
        let mut wb = Workbench::new(BACKEND);
        let ticket = wb.start_analysis().unwrap();
        assert!(matches!(
            wb.start_analysis(),
            Err(WorkbenchError::RequestInFlight(id)) if id == ticket.request_id
        ));
    }

    #[test]
    fn test_settle_unknown_id_ignored() {
        let mut wb = Workbench::new(BACKEND);
        let ticket = wb.start_analysis().unwrap();
        assert_eq!(
            wb.settle(ticket.request_id + 7, &lexical_success()),
            SettleResult::Ignored
        );
        assert!(wb.is_busy());
    }

    #[test]
    fn test_ticket_carries_input_and_mode() {
        let mut wb = Workbench::new(BACKEND);
        wb.set_mode(Mode::Assembly);
        wb.set_input("MOV A, 5");
        let ticket = wb.start_analysis().unwrap();
        assert_eq!(ticket.request, AnalysisRequest::new("MOV A, 5", Mode::Assembly));
    }

    #[test]
    fn test_clear_empties_input_and_output() {
        let mut wb = Workbench::new(BACKEND);
        wb.set_input("x");
        let ticket = wb.start_analysis().unwrap();
        wb.settle(ticket.request_id, &lexical_success());
        assert!(!wb.output().is_empty());

        wb.clear();
        assert!(wb.input().is_empty());
        assert!(wb.output().is_empty());
    }

    #[test]
    fn test_settle_renders_under_origin_mode() {
        let mut wb = Workbench::new(BACKEND);
        wb.set_mode(Mode::Full);
        let ticket = wb.start_analysis().unwrap();
        assert_eq!(wb.settle(ticket.request_id, &lexical_success()), SettleResult::Rendered);
        // Full mode always carries the AST block
        assert!(wb.output().to_plain_text().contains("Árbol de Sintaxis"));
    }

    #[test]
    fn test_toggle_without_store() {
        let mut wb = Workbench::new(BACKEND);
        assert_eq!(wb.theme(), Theme::Dark);
        assert_eq!(wb.toggle_theme().unwrap(), Theme::Light);
    }
}
