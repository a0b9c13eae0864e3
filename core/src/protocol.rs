//! Wire contract with the analysis backend
//!
//! `POST /analyze` with `{ "code", "mode" }`. A 2xx reply carries a payload
//! whose shape depends on the mode; a non-2xx reply carries `{ "error" }`.

use crate::lenient;
use crate::mode::Mode;
use crate::ordered::OrderedMap;
use serde::{Deserialize, Serialize};

/// Request body sent to `/analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    #[serde(rename = "code")]
    pub source_text: String,
    pub mode: Mode,
}

impl AnalysisRequest {
    pub fn new(source_text: impl Into<String>, mode: Mode) -> Self {
        Self {
            source_text: source_text.into(),
            mode,
        }
    }
}

/// `output` in source-language replies: the backend sends either a string or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProgramOutput {
    Text(String),
    Lines(Vec<String>),
}

impl ProgramOutput {
    /// Output as one newline-joined string
    pub fn joined(&self) -> String {
        match self {
            ProgramOutput::Text(text) => text.clone(),
            ProgramOutput::Lines(lines) => lines.join("\n"),
        }
    }
}

/// Reply shape shared by the lexical, semantic and full modes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceReport {
    /// Category → token values
    #[serde(default, deserialize_with = "lenient::token_lists")]
    pub tokens: OrderedMap<Vec<String>>,
    /// Category → number of tokens
    #[serde(default, deserialize_with = "lenient::counts")]
    pub counts: OrderedMap<u64>,
    #[serde(
        default,
        deserialize_with = "lenient::total",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ast: Option<serde_json::Value>,
    #[serde(
        default,
        deserialize_with = "lenient::diagnostics",
        skip_serializing_if = "Option::is_none"
    )]
    pub semantics: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient::program_output",
        skip_serializing_if = "Option::is_none"
    )]
    pub output: Option<ProgramOutput>,
}

impl SourceReport {
    /// Sum of all category counts
    pub fn counted_total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Grand total as reported; falls back to the summed counts when absent
    pub fn total(&self) -> u64 {
        self.total_tokens.unwrap_or_else(|| self.counted_total())
    }

    /// Semantic diagnostics, if any were reported
    pub fn diagnostics(&self) -> &[String] {
        self.semantics.as_deref().unwrap_or(&[])
    }
}

/// Reply shape of the assembly mode
///
/// Register values are unbounded integers on the backend, so they stay raw
/// JSON numbers instead of a fixed-width type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyReport {
    #[serde(default, deserialize_with = "lenient::registers")]
    pub registers: OrderedMap<serde_json::Value>,
    #[serde(default, deserialize_with = "lenient::lines")]
    pub output: Vec<String>,
}

/// Successful backend reply, discriminated by the requesting mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Source(SourceReport),
    Assembly(AssemblyReport),
}

impl AnalysisResponse {
    /// Decode a 2xx body according to the mode that requested it
    ///
    /// The body must be a JSON object; field values are decoded leniently.
    pub fn from_json(mode: Mode, body: &str) -> Result<Self, serde_json::Error> {
        if !body.trim_start().starts_with('{') {
            return Err(serde::de::Error::custom("expected a JSON object"));
        }
        if mode.is_assembly() {
            serde_json::from_str(body).map(AnalysisResponse::Assembly)
        } else {
            serde_json::from_str(body).map(AnalysisResponse::Source)
        }
    }
}

/// Body of a non-2xx reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Classified result of one analysis call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// 2xx with a decodable payload
    Success { response: AnalysisResponse },
    /// Non-2xx with a structured `{ "error" }` message
    ApplicationError { message: String },
    /// Unreachable, timed out, or unparsable; `detail` is for logs only
    TransportError { detail: String },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}
