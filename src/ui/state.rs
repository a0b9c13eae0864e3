//! Application state for the TUI
//!
//! State is split between:
//! - the Workbench (mode, code, rendered output, in-flight request, theme)
//! - transient UI state (focus, command bar, scroll, console, toast)
//!
//! Analysis requests run as tokio tasks; their events come back over an
//! unbounded channel and are drained on every loop tick.

use crate::client::events::{self, AnalysisEvent, AnalysisReceiver, AnalysisSender};
use crate::client::{spawn_analysis, AnalysisClient};
use crate::theme::THEME_CHANGED_TOAST;
use crate::workbench::{SettleResult, Workbench, WorkbenchError};
use chrono::{DateTime, Local};
use compilab_core::{Mode, ModeChange};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::error::TryRecvError;

/// Maximum number of console messages to retain
const MAX_CONSOLE_MESSAGES: usize = 200;

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(1500);

/// Main application state
pub struct App {
    pub workbench: Workbench,
    /// Command bar contents
    pub command_buffer: String,
    pub focus: Focus,
    pub console_messages: Vec<ConsoleMessage>,
    /// Output pane scroll offset (lines from the top)
    pub output_scroll: u16,
    should_quit: bool,
    toast: Option<Toast>,
    client: Arc<AnalysisClient>,
    runtime: tokio::runtime::Handle,
    event_tx: AnalysisSender,
    event_rx: AnalysisReceiver,
}

/// Console message for the status area
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub content: String,
    pub timestamp: DateTime<Local>,
}

/// Transient notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub shown_at: Instant,
}

/// Which pane receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    CommandBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Running,
    /// A request is in flight; the UI stays interactive
    Analyzing,
    Quitting,
}

impl App {
    pub fn new(
        workbench: Workbench,
        client: Arc<AnalysisClient>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let (event_tx, event_rx) = events::channel();
        Self {
            workbench,
            command_buffer: String::new(),
            focus: Focus::Editor,
            console_messages: Vec::new(),
            output_scroll: 0,
            should_quit: false,
            toast: None,
            client,
            runtime,
            event_tx,
            event_rx,
        }
    }

    pub fn state(&self) -> AppState {
        if self.should_quit {
            AppState::Quitting
        } else if self.workbench.is_busy() {
            AppState::Analyzing
        } else {
            AppState::Running
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn backend_url(&self) -> &str {
        self.client.base_url()
    }

    /// Add console message
    pub fn log(&mut self, message: impl Into<String>) {
        self.console_messages.push(ConsoleMessage {
            content: message.into(),
            timestamp: Local::now(),
        });
        if self.console_messages.len() > MAX_CONSOLE_MESSAGES {
            let excess = self.console_messages.len() - MAX_CONSOLE_MESSAGES;
            self.console_messages.drain(..excess);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor => Focus::CommandBar,
            Focus::CommandBar => Focus::Editor,
        };
    }

    /// Handle character input for the focused pane
    pub fn handle_char(&mut self, c: char) {
        match self.focus {
            Focus::Editor => self.workbench.input_mut().push(c),
            Focus::CommandBar => self.command_buffer.push(c),
        }
    }

    pub fn handle_backspace(&mut self) {
        match self.focus {
            Focus::Editor => {
                self.workbench.input_mut().pop();
            }
            Focus::CommandBar => {
                self.command_buffer.pop();
            }
        }
    }

    pub fn handle_newline(&mut self) {
        self.workbench.input_mut().push('\n');
    }

    /// Take the command bar contents, leaving it empty
    pub fn take_command(&mut self) -> String {
        std::mem::take(&mut self.command_buffer)
    }

    pub fn set_mode(&mut self, mode: Mode) -> ModeChange {
        self.output_scroll = 0;
        self.workbench.set_mode(mode)
    }

    pub fn cycle_mode(&mut self) -> ModeChange {
        self.output_scroll = 0;
        self.workbench.cycle_mode()
    }

    /// Send the current code for analysis
    ///
    /// Refused while another request is pending.
    pub fn start_analysis(&mut self) -> Result<u64, WorkbenchError> {
        let ticket = self.workbench.start_analysis()?;
        self.output_scroll = 0;
        spawn_analysis(
            &self.runtime,
            Arc::clone(&self.client),
            ticket.request_id,
            ticket.request,
            self.event_tx.clone(),
        );
        Ok(ticket.request_id)
    }

    /// Drain analysis events without blocking
    ///
    /// Returns the number of events processed.
    pub fn process_analysis_events(&mut self) -> usize {
        let mut processed = 0;
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    processed += 1;
                    self.apply_event(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("analysis event channel closed");
                    break;
                }
            }
        }
        processed
    }

    fn apply_event(&mut self, event: AnalysisEvent) {
        match event {
            AnalysisEvent::Started { request_id, mode } => {
                tracing::debug!(request_id, mode = %mode, "request sent");
            }
            AnalysisEvent::Settled {
                request_id,
                mode,
                outcome,
            } => match self.workbench.settle(request_id, &outcome) {
                SettleResult::Rendered => {
                    if !outcome.is_success() {
                        self.log("El análisis terminó con error");
                    }
                }
                SettleResult::DiscardedStale => {
                    self.log(format!(
                        "Resultado de {} descartado: el modo cambió",
                        mode.label()
                    ));
                }
                SettleResult::Ignored => {}
            },
        }
    }

    /// Theme toggle with confirmation toast
    pub fn toggle_theme(&mut self) {
        let result = self.workbench.toggle_theme();
        self.show_toast(THEME_CHANGED_TOAST);
        if let Err(e) = result {
            self.log(format!("No se pudo guardar el tema: {}", e));
        }
    }

    pub fn show_toast(&mut self, text: impl Into<String>) {
        self.toast = Some(Toast {
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Current toast, if still visible
    pub fn toast(&self) -> Option<&Toast> {
        self.toast
            .as_ref()
            .filter(|t| t.shown_at.elapsed() < TOAST_DURATION)
    }

    /// Drop an expired toast
    pub fn expire_toast(&mut self) {
        if self.toast.is_some() && self.toast().is_none() {
            self.toast = None;
        }
    }

    pub fn scroll_output_up(&mut self, lines: u16) {
        self.output_scroll = self.output_scroll.saturating_sub(lines);
    }

    pub fn scroll_output_down(&mut self, lines: u16) {
        let max = scroll_limit(self.workbench.output().to_lines().len());
        self.output_scroll = self.output_scroll.saturating_add(lines).min(max);
    }
}

/// Scroll offsets are u16 in ratatui; longer outputs stop at the last offset
fn scroll_limit(line_count: usize) -> u16 {
    u16::try_from(line_count).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_limit_saturates() {
        assert_eq!(scroll_limit(0), 0);
        assert_eq!(scroll_limit(120), 120);
        assert_eq!(scroll_limit(70_000), u16::MAX);
    }
}
