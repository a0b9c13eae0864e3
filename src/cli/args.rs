//! CLI argument parsing
//!
//! ```text
//! compilab [--state-dir <path>] [--backend <url>] [command]
//!
//! COMMANDS:
//!   (none) | tui                      Terminal UI
//!   analyze [--mode M] [--example N | FILE | -] [--json] [--save DIR]
//!   examples [--mode M]               List the example catalog
//! ```

use clap::{Parser, Subcommand};
use compilab_core::Mode;
use std::path::PathBuf;

/// Parsed CLI arguments
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(
    name = "compilab",
    version,
    about = "Terminal client for the compilab analysis service",
    long_about = None
)]
pub struct Args {
    /// Directory holding config.toml, prefs.toml and the log file
    #[arg(long, global = true, value_name = "PATH")]
    pub state_dir: Option<PathBuf>,

    /// Backend base URL (overrides config and $COMPILAB_BACKEND)
    #[arg(long, global = true, value_name = "URL")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Interactive terminal UI (default)
    Tui,

    /// Analyze one program and print the result
    Analyze {
        /// lex, sem, full or asm
        #[arg(short, long, default_value = "lex")]
        mode: Mode,

        /// Use the N-th example of the mode (1-based) instead of a file
        #[arg(short, long, value_name = "N", conflicts_with = "file")]
        example: Option<usize>,

        /// Source file; "-" reads stdin
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Print the classified outcome as JSON
        #[arg(long)]
        json: bool,

        /// Also write resultado.txt into DIR
        #[arg(long, value_name = "DIR")]
        save: Option<PathBuf>,
    },

    /// List the example programs of a mode
    Examples {
        #[arg(short, long, default_value = "lex")]
        mode: Mode,
    },
}

impl Args {
    /// Subcommand, defaulting to the TUI
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tui)
    }

    pub fn is_tui(&self) -> bool {
        matches!(self.command(), Command::Tui)
    }
}

/// Parse an explicit argument list (first item is the program name)
pub fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Args::try_parse_from(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_args() {
        let parsed = parse_args(["compilab"]).unwrap();
        assert!(parsed.command.is_none());
        assert!(parsed.is_tui());
    }

    #[test]
    fn test_parse_analyze_defaults() {
        let parsed = parse_args(["compilab", "analyze", "prog.txt"]).unwrap();
        assert_eq!(
            parsed.command(),
            Command::Analyze {
                mode: Mode::Lexical,
                example: None,
                file: Some(PathBuf::from("prog.txt")),
                json: false,
                save: None,
            }
        );
    }

    #[test]
    fn test_parse_analyze_example() {
        let parsed =
            parse_args(["compilab", "analyze", "--mode", "asm", "--example", "2", "--json"])
                .unwrap();
        match parsed.command() {
            Command::Analyze {
                mode, example, json, ..
            } => {
                assert_eq!(mode, Mode::Assembly);
                assert_eq!(example, Some(2));
                assert!(json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_example_conflicts_with_file() {
        assert!(parse_args(["compilab", "analyze", "--example", "1", "prog.txt"]).is_err());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(parse_args(["compilab", "examples", "--mode", "python"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let parsed = parse_args([
            "compilab",
            "examples",
            "--backend",
            "http://example:9000",
            "--state-dir",
            "/tmp",
        ])
        .unwrap();
        assert_eq!(parsed.backend.as_deref(), Some("http://example:9000"));
        assert_eq!(parsed.state_dir, Some(PathBuf::from("/tmp")));
    }
}
