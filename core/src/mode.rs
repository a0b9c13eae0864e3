//! Analysis modes and the single active-mode state
//!
//! Exactly one mode is active at a time. Changing it invalidates whatever
//! output is currently displayed, so a result is never shown under the
//! formatting rules of a different mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Analysis target requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Mode {
    /// Tokens only
    #[default]
    #[serde(rename = "lex")]
    Lexical,
    /// Tokens + semantic diagnostics (+ program output)
    #[serde(rename = "sem")]
    Semantic,
    /// Tokens + AST
    #[serde(rename = "full")]
    Full,
    /// Assemble and execute (registers + output)
    #[serde(rename = "asm")]
    Assembly,
}

impl Mode {
    /// All modes in selector order
    pub const ALL: [Mode; 4] = [Mode::Lexical, Mode::Semantic, Mode::Full, Mode::Assembly];

    /// Name sent on the wire in the `mode` field
    pub fn wire_name(self) -> &'static str {
        match self {
            Mode::Lexical => "lex",
            Mode::Semantic => "sem",
            Mode::Full => "full",
            Mode::Assembly => "asm",
        }
    }

    /// Label for the mode selector
    pub fn label(self) -> &'static str {
        match self {
            Mode::Lexical => "Léxico",
            Mode::Semantic => "Semántico",
            Mode::Full => "Completo",
            Mode::Assembly => "Ensamblador",
        }
    }

    /// Whether the mode targets the assembly language (vs. the source language)
    pub fn is_assembly(self) -> bool {
        matches!(self, Mode::Assembly)
    }

    /// Next mode in selector order (wraps)
    pub fn next(self) -> Mode {
        match self {
            Mode::Lexical => Mode::Semantic,
            Mode::Semantic => Mode::Full,
            Mode::Full => Mode::Assembly,
            Mode::Assembly => Mode::Lexical,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error for unrecognised mode names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown mode: {0} (expected lex, sem, full or asm)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Accepts wire names and the long English names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lex" | "lexical" => Ok(Mode::Lexical),
            "sem" | "semantic" => Ok(Mode::Semantic),
            "full" => Ok(Mode::Full),
            "asm" | "assembly" => Ok(Mode::Assembly),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Result of a mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub previous: Mode,
    pub current: Mode,
    /// Rendered output must be emptied; always true, re-selection included
    pub clear_output: bool,
}

/// Holder of the active mode
///
/// Owned by the orchestrator; nothing else mutates the mode.
#[derive(Debug, Clone, Default)]
pub struct ModeState {
    current: Mode,
}

impl ModeState {
    /// New state starting in `Mode::Lexical`
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_mode(&self) -> Mode {
        self.current
    }

    /// Select a mode. The returned change always asks for an output reset.
    pub fn set_mode(&mut self, mode: Mode) -> ModeChange {
        let previous = self.current;
        self.current = mode;
        if previous != mode {
            tracing::debug!(from = %previous, to = %mode, "mode changed");
        }
        ModeChange {
            previous,
            current: mode,
            clear_output: true,
        }
    }
}
