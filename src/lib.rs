//! Accesscheck - WCAG 2.1 Level AA analysis and remediation engine.
//!
//! Accesscheck takes a normalized document model (slides or pages with
//! images, links, headings, text blocks, and tables), runs a battery of
//! rule-based accessibility checks, applies the bounded set of safe
//! automatic fixes, and emits a structured per-page and per-document
//! report. Format parsing, file storage, and the web front end live in
//! external collaborators; this crate is the engine between them.
//!
//! # Architecture
//!
//! - `model`: the normalized document model and element references
//! - `contrast`: pure WCAG luminance and contrast-ratio math
//! - `detect`: one detector per check family, plus the runner
//! - `classify`: table-driven severity/priority/WCAG metadata
//! - `assistant`: the external text/vision assistant boundary
//! - `remediate`: the auto-fix planner and action log
//! - `score`: page and document scoring
//! - `report`: report assembly and output formatting
//! - `pipeline`: one-run orchestration and cancellation
//!
//! # Adding a New Check
//!
//! Add a module under `src/detect/`, give it a rank, wire it into
//! `detect::Runner`, and add a metadata row in `classify::rule_meta`.

pub mod assistant;
pub mod classify;
pub mod cli;
pub mod config;
pub mod contrast;
pub mod detect;
pub mod model;
pub mod pipeline;
pub mod remediate;
pub mod report;
pub mod score;

pub use assistant::{Assistant, AssistantError, OllamaAssistant, StubAssistant};
pub use config::EngineConfig;
pub use detect::{Issue, IssueKind, IssueStatus, Priority, Runner, Severity};
pub use model::{Document, Element, ElementRef, Page};
pub use pipeline::{run, CancelFlag, EngineError, RunOptions, RunOutput};
pub use remediate::{RemediationAction, ALT_TEXT_PLACEHOLDER};
pub use report::Report;
