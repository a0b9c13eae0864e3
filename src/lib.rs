//! Compilab: terminal client for the compilers-course analysis service
//!
//! Sends source code to the backend under one of four modes (lexical,
//! semantic, full, assembly) and renders what comes back. The pure parts
//! (modes, wire contract, examples, error translation, rendering) live in
//! `compilab-core`; this crate adds the HTTP client, persistence, the
//! workbench and the front ends.

pub mod cli;
pub mod client;
pub mod config;
pub mod file_tools;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod workbench;

// Re-export the pieces front ends need
pub use client::{AnalysisClient, AnalysisEvent, FakeTransport, Transport, TransportError};
pub use config::{BackendConfig, Config, ConfigError, LoggingConfig};
pub use file_tools::{file_read, file_write, write_output, FileReadError, FileWriteError};
pub use theme::{Theme, ThemeError, ThemeStore};
pub use workbench::{SettleResult, Ticket, Workbench, WorkbenchError};
