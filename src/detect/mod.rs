//! Accessibility issue detectors.
//!
//! One module per check family. Every detector is a pure function over a
//! read-only page view, producing findings in deterministic order; adding a
//! check means adding a module and wiring it into [`Runner`].

mod alt_text;
mod caps;
mod contrast;
mod fonts;
mod headings;
mod links;
mod runner;
mod tables;
mod types;

pub use alt_text::{detect_alt_text, is_generic_alt};
pub use caps::{detect_all_caps, is_all_caps};
pub use contrast::detect_contrast;
pub use fonts::detect_small_fonts;
pub use headings::HeadingTracker;
pub use links::{derive_suggestions, detect_link_text, is_vague_link_text, passes_quality};
pub use runner::Runner;
pub use tables::detect_table_headers;
pub use types::{
    DetectionResult, Finding, Issue, IssueKind, IssueStatus, Priority, Severity,
};
