//! One pipeline run per document.
//!
//! Stages: validate and detect (read-only, page-parallel) → classify →
//! remediate (the single mutation pass) → score → report. A run owns its
//! document copy and shares nothing mutable with concurrent runs. It either
//! produces a complete report or fails with a reason; a cancelled or broken
//! run emits nothing partial.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::assistant::Assistant;
use crate::classify;
use crate::config::EngineConfig;
use crate::detect::{Issue, Runner};
use crate::model::Document;
use crate::remediate::{self, RemediationAction};
use crate::report::{self, Report};

/// Fatal pipeline errors. Input problems are handled per element as
/// warnings and never land here; these mean the run itself is broken.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Internal state went inconsistent (e.g. an issue pointing at an
    /// element that is not in the model). Indicates a bug, not bad input.
    #[error("pipeline invariant violated: {0}")]
    Invariant(String),
    /// The run was cancelled before completion.
    #[error("run cancelled")]
    Cancelled,
}

/// Cooperative cancellation handle. Setting it stops the planner from
/// issuing new assistant calls; in-flight calls finish or time out on
/// their own.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Per-run options.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Apply automatic fixes; detection-only runs leave every issue open.
    pub apply_fixes: bool,
    /// Timestamp recorded in the report. Passed in so the report stays a
    /// pure function of its inputs.
    pub analysis_date: String,
}

impl RunOptions {
    /// Options stamped with the current UTC time.
    pub fn now(apply_fixes: bool) -> Self {
        Self {
            apply_fixes,
            analysis_date: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Everything a completed run hands back: the report, the (possibly
/// mutated) document for re-serialization, and the action log.
#[derive(Debug)]
pub struct RunOutput {
    pub report: Report,
    pub document: Document,
    pub actions: Vec<RemediationAction>,
    pub issues: Vec<Issue>,
}

/// Run the full pipeline over one document.
pub async fn run<A: Assistant>(
    mut document: Document,
    assistant: &A,
    config: &EngineConfig,
    options: &RunOptions,
    cancel: &CancelFlag,
) -> Result<RunOutput, EngineError> {
    info!(
        document = %document.name,
        pages = document.pages.len(),
        "starting accessibility analysis"
    );

    let detection = Runner::new(config.detection.clone()).run(&document);
    let mut issues: Vec<Issue> = detection.findings.into_iter().map(classify::classify).collect();
    info!(
        issues = issues.len(),
        warnings = detection.warnings.len(),
        "detection complete"
    );

    let actions = if options.apply_fixes {
        remediate::remediate(
            &mut document,
            &mut issues,
            assistant,
            config.assistant.enabled,
            cancel,
        )
        .await?
    } else {
        Vec::new()
    };

    if cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }

    let report = report::build(
        &document,
        &issues,
        &actions,
        &detection.warnings,
        &options.analysis_date,
    )?;

    info!(score = report.executive_summary.overall_score, "run complete");
    Ok(RunOutput {
        report,
        document,
        actions,
        issues,
    })
}
