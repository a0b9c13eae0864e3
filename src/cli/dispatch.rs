//! CLI mode dispatch
//!
//! Headless commands:
//! - analyze: one request, rendered document (or JSON outcome) on stdout
//! - examples: catalog listing
//!
//! The TUI is started from `main`.

use crate::cli::args::Command;
use crate::cli::{Error, Result, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::client::AnalysisClient;
use crate::config::Config;
use crate::file_tools::{file_read, stdin_read};
use crate::workbench::{SettleResult, Workbench};
use compilab_core::catalog;
use compilab_core::{Mode, Outcome};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Exit code wrapper for CLI operations
pub type ExitCode = i32;

/// Where `analyze` takes its source text from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSpec {
    /// 1-based catalog index
    Example(usize),
    File(PathBuf),
    Stdin,
}

impl SourceSpec {
    pub fn from_args(example: Option<usize>, file: Option<PathBuf>) -> Self {
        match (example, file) {
            (Some(n), _) => SourceSpec::Example(n),
            (None, Some(path)) if path.as_os_str() == "-" => SourceSpec::Stdin,
            (None, Some(path)) => SourceSpec::File(path),
            (None, None) => SourceSpec::Stdin,
        }
    }
}

/// Run a headless command and return its exit code
pub fn run_cli_mode(command: Command, config: &Config, runtime: &tokio::runtime::Runtime) -> ExitCode {
    let result = match command {
        Command::Examples { mode } => print_examples(mode).map(|()| EXIT_SUCCESS),
        Command::Analyze {
            mode,
            example,
            file,
            json,
            save,
        } => {
            let source = SourceSpec::from_args(example, file);
            runtime.block_on(run_analyze(config, mode, source, json, save.as_deref()))
        }
        Command::Tui => Err(Error::InvalidArgs(
            "tui is not a headless command".to_string(),
        )),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            tracing::error!(error = %e, "command failed");
            match e {
                Error::Config(_) => EXIT_CONFIG_ERROR,
                _ => EXIT_FAILURE,
            }
        }
    }
}

/// Load the requested source text for `mode`
pub fn load_source(mode: Mode, source: &SourceSpec) -> Result<String> {
    match source {
        SourceSpec::Example(n) => {
            let index = n
                .checked_sub(1)
                .ok_or_else(|| Error::InvalidArgs("examples are numbered from 1".to_string()))?;
            Ok(catalog::pick_example(mode, index)?.code.to_string())
        }
        SourceSpec::File(path) => Ok(file_read(path)?),
        SourceSpec::Stdin => Ok(stdin_read()?),
    }
}

/// One analysis, printed to stdout
///
/// Exit code is 0 on success and 1 on an application or transport error;
/// the rendered message is printed in both cases.
pub async fn run_analyze(
    config: &Config,
    mode: Mode,
    source: SourceSpec,
    json: bool,
    save: Option<&Path>,
) -> Result<ExitCode> {
    let client = AnalysisClient::from_config(&config.backend)?;
    let code = load_source(mode, &source)?;

    let mut workbench = Workbench::new(client.base_url());
    workbench.set_mode(mode);
    workbench.set_input(code);

    let (outcome, settled) = analyze_once(&mut workbench, &client).await?;
    tracing::debug!(?settled, "headless analysis settled");

    let mut stdout = std::io::stdout().lock();
    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&outcome)?)?;
    } else {
        write!(stdout, "{}", workbench.output().to_plain_text())?;
    }

    if let Some(dir) = save {
        let path = workbench.save_output(dir)?;
        eprintln!("Saved {}", path.display());
    }

    Ok(if outcome.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    })
}

/// Drive one request through the workbench protocol
pub async fn analyze_once(
    workbench: &mut Workbench,
    client: &AnalysisClient,
) -> Result<(Outcome, SettleResult)> {
    let ticket = workbench.start_analysis()?;
    let outcome = client.send(&ticket.request).await;
    let settled = workbench.settle(ticket.request_id, &outcome);
    Ok((outcome, settled))
}

fn print_examples(mode: Mode) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{} ({})", mode.label(), mode.wire_name())?;
    for line in catalog::menu(mode) {
        writeln!(stdout, "  {}", line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FakeTransport;

    #[test]
    fn test_exit_code_constants() {
        assert_eq!(EXIT_SUCCESS, 0);
        assert_eq!(EXIT_FAILURE, 1);
        assert_eq!(EXIT_CONFIG_ERROR, 2);
    }

    #[test]
    fn test_source_spec_from_args() {
        assert_eq!(SourceSpec::from_args(Some(3), None), SourceSpec::Example(3));
        assert_eq!(
            SourceSpec::from_args(None, Some(PathBuf::from("-"))),
            SourceSpec::Stdin
        );
        assert_eq!(SourceSpec::from_args(None, None), SourceSpec::Stdin);
        assert_eq!(
            SourceSpec::from_args(None, Some(PathBuf::from("a.asm"))),
            SourceSpec::File(PathBuf::from("a.asm"))
        );
    }

    #[test]
    fn test_load_source_example_is_one_based() {
        let first = load_source(Mode::Assembly, &SourceSpec::Example(1)).unwrap();
        assert_eq!(first, catalog::entries(Mode::Assembly)[0].code);
        assert!(load_source(Mode::Assembly, &SourceSpec::Example(0)).is_err());
        assert!(matches!(
            load_source(Mode::Assembly, &SourceSpec::Example(99)),
            Err(Error::Example(_))
        ));
    }

    #[tokio::test]
    async fn test_analyze_once_renders() {
        let client = AnalysisClient::with_transport(
            "http://fake",
            FakeTransport::new(r#"{"registers": {"A": 5}, "output": ["5"]}"#),
        );
        let mut workbench = Workbench::new(client.base_url());
        workbench.set_mode(Mode::Assembly);
        workbench.set_input("MOV A, 5\nOUT A");

        let (outcome, settled) = analyze_once(&mut workbench, &client).await.unwrap();
        assert!(outcome.is_success());
        assert_eq!(settled, SettleResult::Rendered);
        assert!(workbench.output().to_plain_text().contains("A: 5"));
    }
}
