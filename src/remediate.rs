//! Remediation planner.
//!
//! Decides per issue whether an automatic fix is safe, applies it to the
//! document model in place, and records every change in an append-only
//! action log. Alt text and link text are the only auto-fixable families;
//! structural and design problems always go to manual review.
//!
//! The planner is idempotent: a fix is only applied when it actually
//! changes the element, so re-running over an already-fixed model records
//! no new actions. The log never contains an action whose after-value
//! equals its before-value.

use serde::Serialize;
use tracing::{debug, info};

use crate::assistant::{clean_suggestion, AltTextRequest, Assistant, LinkTextRequest};
use crate::detect::{is_generic_alt, passes_quality, Issue, IssueKind, IssueStatus};
use crate::model::{truncate, Document, Element, ElementRef};
use crate::pipeline::{CancelFlag, EngineError};

/// Minimal fallback applied when no usable alt text can be generated.
/// A placeholder fix keeps the issue flagged for manual review.
pub const ALT_TEXT_PLACEHOLDER: &str = "Image";

/// What kind of content a remediation action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AltText,
    LinkText,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::AltText => "alt_text",
            ActionKind::LinkText => "link_text",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One applied fix. Never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct RemediationAction {
    pub element: ElementRef,
    pub action: ActionKind,
    pub before: String,
    pub after: String,
    pub automatic: bool,
    /// Set when the fix degraded to a fallback, e.g. on assistant failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RemediationAction {
    /// One-line summary for logs and reports.
    pub fn describe(&self) -> String {
        match self.action {
            ActionKind::AltText if self.before.is_empty() => {
                format!("Added alt text: '{}'", truncate(&self.after, 50))
            }
            ActionKind::AltText => format!(
                "Replaced alt text '{}' with '{}'",
                truncate(&self.before, 50),
                truncate(&self.after, 50)
            ),
            ActionKind::LinkText => format!(
                "Updated link text: '{}' to '{}'",
                truncate(&self.before, 50),
                truncate(&self.after, 50)
            ),
        }
    }
}

/// Run the fix policy over every open issue, in issue order.
///
/// Mutates the document in place and updates each issue's status exactly
/// once. Assistant calls happen sequentially so the action log order is
/// deterministic.
pub async fn remediate<A: Assistant>(
    document: &mut Document,
    issues: &mut [Issue],
    assistant: &A,
    assistant_enabled: bool,
    cancel: &CancelFlag,
) -> Result<Vec<RemediationAction>, EngineError> {
    let mut actions = Vec::new();

    for issue in issues.iter_mut() {
        if issue.status != IssueStatus::Open {
            continue;
        }
        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled);
        }

        match issue.kind {
            IssueKind::MissingAltText | IssueKind::PoorAltText => {
                fix_alt_text(document, issue, assistant, assistant_enabled, &mut actions).await?;
            }
            IssueKind::VagueLinkText => {
                fix_link_text(document, issue, assistant, assistant_enabled, &mut actions).await?;
            }
            // Structural and design judgment stays with a human.
            IssueKind::HeadingHierarchy
            | IssueKind::LowContrast
            | IssueKind::AllCapsText
            | IssueKind::SmallFont
            | IssueKind::MissingTableHeaders => {
                issue.status = IssueStatus::ManualReview;
            }
        }
    }

    info!(fixes = actions.len(), "remediation pass complete");
    Ok(actions)
}

async fn fix_alt_text<A: Assistant>(
    document: &mut Document,
    issue: &mut Issue,
    assistant: &A,
    assistant_enabled: bool,
    actions: &mut Vec<RemediationAction>,
) -> Result<(), EngineError> {
    let (source, before) = match document.resolve(issue.element) {
        Some(Element::Image(image)) => (
            image.source.clone(),
            image.alt_text.clone().unwrap_or_default(),
        ),
        _ => {
            return Err(EngineError::Invariant(format!(
                "issue {} references missing element ({})",
                issue.kind, issue.element
            )))
        }
    };

    let context = page_context(document, issue.page);
    let mut note = None;

    let suggestion = if assistant_enabled {
        let request = AltTextRequest {
            source: source.as_deref(),
            current_alt: (!before.is_empty()).then_some(before.as_str()),
            page_context: &context,
        };
        match assistant.suggest_alt_text(&request).await {
            Ok(text) => {
                let cleaned = clean_suggestion(&text);
                if cleaned.is_empty() || is_generic_alt(&cleaned) {
                    note = Some("assistant suggestion failed quality check, used placeholder".to_string());
                    None
                } else {
                    Some(cleaned)
                }
            }
            Err(e) => {
                note = Some(format!("assistant unavailable ({}), used placeholder", e));
                None
            }
        }
    } else {
        note = Some("assistant disabled, used placeholder".to_string());
        None
    };

    let (after, substantive) = match suggestion {
        Some(text) => (text, true),
        None => (ALT_TEXT_PLACEHOLDER.to_string(), false),
    };

    if after == before {
        // Nothing to change; hand it back to a human.
        debug!(element = %issue.element, "alt-text candidate equals current value, skipping");
        issue.status = IssueStatus::ManualReview;
        return Ok(());
    }

    match document.resolve_mut(issue.element) {
        Some(Element::Image(image)) => image.alt_text = Some(after.clone()),
        _ => {
            return Err(EngineError::Invariant(format!(
                "issue {} references missing element ({})",
                issue.kind, issue.element
            )))
        }
    }

    actions.push(RemediationAction {
        element: issue.element,
        action: ActionKind::AltText,
        before,
        after,
        automatic: true,
        note,
    });
    issue.status = if substantive {
        IssueStatus::AutoFixed
    } else {
        IssueStatus::PlaceholderFixed
    };
    Ok(())
}

async fn fix_link_text<A: Assistant>(
    document: &mut Document,
    issue: &mut Issue,
    assistant: &A,
    assistant_enabled: bool,
    actions: &mut Vec<RemediationAction>,
) -> Result<(), EngineError> {
    let (target, before) = match document.resolve(issue.element) {
        Some(Element::Link(link)) => (link.target.clone(), link.text.clone()),
        _ => {
            return Err(EngineError::Invariant(format!(
                "issue {} references missing element ({})",
                issue.kind, issue.element
            )))
        }
    };

    let context = page_context(document, issue.page);
    let mut note = None;
    let mut candidates = Vec::new();

    if assistant_enabled {
        let request = LinkTextRequest {
            target: &target,
            current_text: &before,
            page_context: &context,
        };
        match assistant.suggest_link_text(&request).await {
            Ok(text) => candidates.push(clean_suggestion(&text)),
            Err(e) => note = Some(format!("assistant unavailable ({}), used derived suggestion", e)),
        }
    }
    candidates.extend(issue.suggestions.iter().cloned());

    let after = candidates
        .into_iter()
        .find(|candidate| passes_quality(candidate) && *candidate != before);

    let after = match after {
        Some(text) => text,
        None => {
            issue.status = IssueStatus::ManualReview;
            return Ok(());
        }
    };

    match document.resolve_mut(issue.element) {
        Some(Element::Link(link)) => link.text = after.clone(),
        _ => {
            return Err(EngineError::Invariant(format!(
                "issue {} references missing element ({})",
                issue.kind, issue.element
            )))
        }
    }

    actions.push(RemediationAction {
        element: issue.element,
        action: ActionKind::LinkText,
        before,
        after,
        automatic: true,
        note,
    });
    issue.status = IssueStatus::AutoFixed;
    Ok(())
}

/// Text handed to the assistant as slide context: the page title plus the
/// first body text block.
fn page_context(document: &Document, page_number: usize) -> String {
    let page = match document.page(page_number) {
        Some(page) => page,
        None => return String::new(),
    };
    let mut parts = Vec::new();
    if let Some(title) = &page.title {
        parts.push(title.clone());
    }
    if let Some(text) = page.elements.iter().find_map(|e| match e {
        Element::TextBlock(t) if !t.text.trim().is_empty() => Some(t.text.trim()),
        _ => None,
    }) {
        parts.push(truncate(text, 200));
    }
    parts.join(" - ")
}
