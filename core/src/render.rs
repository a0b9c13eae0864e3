//! Response rendering
//!
//! Turns a backend reply into a [`Document`]. Branches on the active mode
//! and on which optional fields the reply carries:
//!
//! | mode | categories + total | AST | diagnostics | program output |
//! |------|--------------------|-----|-------------|----------------|
//! | lex  | yes | no | no | no |
//! | sem  | yes | only if no diagnostics | list or "no errors" | if `output` present |
//! | full | yes | always | no | no |
//! | asm  | no (registers + output only) | no | no | no |
//!
//! Shape violations (counts without tokens, missing fields) never fail the
//! render; they are logged and drawn with empty values.

use crate::document::{Block, CategoryLine, Document, Tone};
use crate::lenient::text_of;
use crate::mode::Mode;
use crate::protocol::{AnalysisResponse, AssemblyReport, Outcome, SourceReport};
use crate::translate;

pub const TOTAL_LABEL: &str = "Total de tokens:";
pub const AST_TITLE: &str = "Árbol de Sintaxis (AST)";
pub const NO_AST_PLACEHOLDER: &str = "(el servidor no devolvió un AST)";
pub const SEMANTIC_ERRORS_TITLE: &str = "Errores Semánticos";
pub const NO_SEMANTIC_ERRORS: &str = "Sin errores semánticos";
pub const PROGRAM_OUTPUT_TITLE: &str = "Salida del programa:";
pub const EMPTY_PROGRAM_OUTPUT: &str = "(el programa no produjo salida)";
pub const REGISTERS_TITLE: &str = "Registros:";
pub const ASSEMBLY_OUTPUT_TITLE: &str = "Salida:";
pub const ANALYSIS_FAILED: &str = "Ocurrió un error durante el análisis";
pub const CONNECTION_FAILED: &str = "No se pudo conectar con el servidor";

/// Render a successful reply under the given mode
pub fn render(mode: Mode, response: &AnalysisResponse) -> Document {
    match (mode, response) {
        (Mode::Assembly, AnalysisResponse::Assembly(report)) => render_assembly(report),
        (Mode::Assembly, AnalysisResponse::Source(_)) => {
            tracing::warn!("source-language payload under assembly mode; rendering empty machine state");
            render_assembly(&AssemblyReport::default())
        }
        (_, AnalysisResponse::Source(report)) => render_source(mode, report),
        (_, AnalysisResponse::Assembly(_)) => {
            tracing::warn!(%mode, "assembly payload under source-language mode; rendering empty report");
            render_source(mode, &SourceReport::default())
        }
    }
}

/// Registers dump and joined output; nothing else
fn render_assembly(report: &AssemblyReport) -> Document {
    let entries = report
        .registers
        .iter()
        .map(|(name, value)| (name.to_string(), text_of(value)))
        .collect();

    Document {
        blocks: vec![
            Block::KeyValue {
                title: REGISTERS_TITLE.to_string(),
                entries,
            },
            Block::preformatted(ASSEMBLY_OUTPUT_TITLE, report.output.join("\n"), Tone::Warning),
        ],
    }
}

fn render_source(mode: Mode, report: &SourceReport) -> Document {
    let mut doc = Document::new();
    render_categories(&mut doc, report);

    let diagnostics = report.diagnostics();

    let show_ast = match mode {
        Mode::Full => true,
        Mode::Semantic => diagnostics.is_empty(),
        _ => false,
    };
    if show_ast {
        doc.push(Block::Divider);
        doc.push(ast_block(report));
    }

    if mode == Mode::Semantic {
        doc.push(Block::Divider);
        if diagnostics.is_empty() {
            doc.push(Block::heading(NO_SEMANTIC_ERRORS, Tone::Success));
        } else {
            doc.push(Block::List {
                title: SEMANTIC_ERRORS_TITLE.to_string(),
                items: diagnostics.to_vec(),
                tone: Tone::Error,
            });
        }

        if let Some(output) = &report.output {
            let text = output.joined();
            let text = if text.is_empty() {
                EMPTY_PROGRAM_OUTPUT.to_string()
            } else {
                text
            };
            doc.push(Block::preformatted(PROGRAM_OUTPUT_TITLE, text, Tone::Warning));
        }
    }

    doc
}

/// One line per category in `counts`, then the grand total
fn render_categories(doc: &mut Document, report: &SourceReport) {
    for (category, count) in report.counts.iter() {
        let values = match report.tokens.get(category) {
            Some(values) => values.clone(),
            None => {
                tracing::warn!(category, "category counted but missing from tokens");
                Vec::new()
            }
        };
        doc.push(Block::Category(CategoryLine {
            category: category.to_string(),
            count: *count,
            values,
        }));
    }

    for category in report.tokens.keys() {
        if !report.counts.contains_key(category) {
            tracing::warn!(category, "category in tokens but missing from counts; skipped");
        }
    }

    let total = report.total();
    let counted = report.counted_total();
    if total != counted {
        tracing::warn!(total, counted, "total_tokens disagrees with summed counts");
    }
    doc.push(Block::labelled(TOTAL_LABEL, total.to_string()));
}

fn ast_block(report: &SourceReport) -> Block {
    let text = match &report.ast {
        Some(ast) => serde_json::to_string_pretty(ast).unwrap_or_else(|_| ast.to_string()),
        None => NO_AST_PLACEHOLDER.to_string(),
    };
    Block::preformatted(AST_TITLE, text, Tone::Success)
}

/// Document for a backend-reported failure, translated for the user
pub fn render_application_error(raw: &str) -> Document {
    Document {
        blocks: vec![
            Block::heading(ANALYSIS_FAILED, Tone::Error),
            Block::paragraph(translate::translate(raw), Tone::Error),
        ],
    }
}

/// Fixed connectivity document; never consults the translator
pub fn render_transport_error(backend: &str) -> Document {
    Document {
        blocks: vec![
            Block::heading(CONNECTION_FAILED, Tone::Error),
            Block::paragraph(
                format!(
                    "Revisa que el backend esté en ejecución en {} y que no existan bloqueos de red.",
                    backend
                ),
                Tone::Error,
            ),
        ],
    }
}

/// Document for any classified outcome
pub fn render_outcome(mode: Mode, outcome: &Outcome, backend: &str) -> Document {
    match outcome {
        Outcome::Success { response } => render(mode, response),
        Outcome::ApplicationError { message } => render_application_error(message),
        Outcome::TransportError { .. } => render_transport_error(backend),
    }
}
