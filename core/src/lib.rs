//! Compilab core: modes, backend contract, examples, error translation and rendering
//!
//! Everything here is pure data and pure functions. No I/O, no async; the
//! client and the terminal adapter live in the `compilab` crate.

pub mod catalog;
pub mod document;
pub mod lenient;
pub mod mode;
pub mod ordered;
pub mod protocol;
pub mod render;
pub mod translate;

pub use catalog::{ExampleEntry, ExampleError};
pub use document::{Block, CategoryLine, Document, Tone};
pub use mode::{Mode, ModeChange, ModeState, ParseModeError};
pub use ordered::OrderedMap;
pub use protocol::{
    AnalysisRequest, AnalysisResponse, AssemblyReport, ErrorBody, Outcome, ProgramOutput,
    SourceReport,
};
pub use render::{render, render_outcome};
pub use translate::{translate, ErrorTranslator, TranslationRule};
