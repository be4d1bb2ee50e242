//! Severity and priority classification.
//!
//! A pure, table-driven mapping from issue kind to remediation metadata:
//! WCAG criterion, estimated fix time, and the action a human should take.
//! Priority follows severity. Adding an issue kind means adding one table
//! entry here and an enum arm in `detect::types`.

use crate::detect::{Finding, Issue, IssueKind, IssueStatus, Priority, Severity};

/// Static remediation metadata for one issue kind.
pub struct RuleMeta {
    pub wcag_criterion: &'static str,
    pub estimated_time: &'static str,
    pub required_action: &'static str,
}

/// Look up the metadata table entry for an issue kind.
pub fn rule_meta(kind: IssueKind) -> RuleMeta {
    match kind {
        IssueKind::MissingAltText => RuleMeta {
            wcag_criterion: "1.1.1 Non-text Content",
            estimated_time: "2-5 minutes",
            required_action: "Add descriptive alt text explaining the image content and purpose",
        },
        IssueKind::PoorAltText => RuleMeta {
            wcag_criterion: "1.1.1 Non-text Content",
            estimated_time: "3-7 minutes",
            required_action: "Replace with descriptive alt text that explains the image's content and purpose",
        },
        IssueKind::VagueLinkText => RuleMeta {
            wcag_criterion: "2.4.4 Link Purpose",
            estimated_time: "2-3 minutes",
            required_action: "Replace with descriptive text that explains the link's destination or purpose",
        },
        IssueKind::HeadingHierarchy => RuleMeta {
            wcag_criterion: "1.3.1 Info and Relationships",
            estimated_time: "1-2 minutes",
            required_action: "Use sequential heading levels (h1, h2, h3, etc.) without skipping",
        },
        IssueKind::LowContrast => RuleMeta {
            wcag_criterion: "1.4.3 Contrast (Minimum)",
            estimated_time: "5-10 minutes",
            required_action: "Increase contrast between the text and background colors",
        },
        IssueKind::AllCapsText => RuleMeta {
            wcag_criterion: "1.4.8 Visual Presentation",
            estimated_time: "2-6 minutes",
            required_action: "Convert to sentence case, use bold or emphasis for importance",
        },
        IssueKind::SmallFont => RuleMeta {
            wcag_criterion: "1.4.12 Text Spacing",
            estimated_time: "1-3 minutes",
            required_action: "Increase the font size to at least the 12pt minimum",
        },
        IssueKind::MissingTableHeaders => RuleMeta {
            wcag_criterion: "1.3.1 Info and Relationships",
            estimated_time: "3-5 minutes",
            required_action: "Mark the first row as a header row",
        },
    }
}

/// Priority from severity: critical and high violations must be fixed.
pub fn priority_for(severity: Severity) -> Priority {
    match severity {
        Severity::Critical | Severity::High => Priority::MustFix,
        Severity::Medium => Priority::ShouldFix,
        Severity::Low => Priority::CouldFix,
    }
}

/// Attach remediation metadata to a raw finding. Issues start `Open`;
/// everything except status is fixed from here on.
pub fn classify(finding: Finding) -> Issue {
    let meta = rule_meta(finding.kind);
    Issue {
        kind: finding.kind,
        severity: finding.severity,
        page: finding.page,
        element: finding.element,
        description: finding.description,
        current_state: finding.current_state,
        required_action: meta.required_action,
        wcag_criterion: meta.wcag_criterion,
        priority: priority_for(finding.severity),
        estimated_time: meta.estimated_time,
        suggestions: finding.suggestions,
        status: IssueStatus::Open,
    }
}
