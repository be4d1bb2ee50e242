//! Report assembly and output formatting.
//!
//! [`build`] is a pure function from the classified issue set, the action
//! log, and the document model to a [`Report`]; identical inputs produce an
//! identical report. Output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for the web front end and file writer

use colored::*;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::classify::rule_meta;
use crate::detect::{Issue, IssueKind, Priority, Severity};
use crate::model::{AnalysisWarning, Document, ElementCounts, ElementRef};
use crate::pipeline::EngineError;
use crate::remediate::RemediationAction;
use crate::score;

/// Complete per-document report. Built once, read-only afterward.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub document_info: DocumentInfo,
    pub executive_summary: ExecutiveSummary,
    pub pages: Vec<PageReport>,
    pub remediation_summary: RemediationSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub analysis_warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub file_name: String,
    pub analysis_date: String,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExecutiveSummary {
    pub overall_score: i32,
    pub total_issues: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    pub medium_issues: usize,
    pub low_issues: usize,
    pub fixes_applied: usize,
    pub manual_review_needed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub page_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub issues: Vec<Issue>,
    pub accessibility_score: i32,
    pub elements_analyzed: ElementCounts,
    pub remediation: PageRemediation,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageRemediation {
    pub automatic_fixes_applied: usize,
    pub manual_actions_remaining: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fixes_details: Vec<FixDetail>,
}

/// One applied fix, as shown in the report.
#[derive(Debug, Clone, Serialize)]
pub struct FixDetail {
    pub action: &'static str,
    pub element: ElementRef,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemediationSummary {
    pub automatic_fixes: Vec<FixDetail>,
    pub manual_actions_needed: Vec<ManualAction>,
}

/// A worklist entry: all outstanding issues of one kind across the
/// document.
#[derive(Debug, Clone, Serialize)]
pub struct ManualAction {
    pub issue_type: String,
    pub count: usize,
    pub pages_affected: Vec<usize>,
    pub priority: Priority,
    pub total_estimated_time: String,
    pub wcag_criterion: &'static str,
    pub action_needed: &'static str,
}

static TIME_NUMBERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Average minutes from an estimate like "2-5 minutes" or "3 minutes".
fn estimated_minutes(estimate: &str) -> f64 {
    let numbers: Vec<f64> = TIME_NUMBERS
        .find_iter(estimate)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    match numbers.as_slice() {
        [only] => *only,
        [low, high, ..] => (low + high) / 2.0,
        [] => 3.0,
    }
}

fn fix_detail(action: &RemediationAction) -> FixDetail {
    FixDetail {
        action: action.action.as_str(),
        element: action.element,
        description: action.describe(),
        note: action.note.clone(),
    }
}

/// Assemble the report.
///
/// Verifies the aggregation invariant first: every issue must reference an
/// element that exists in the model. A dangling reference means the
/// pipeline itself is broken, so the run fails rather than emitting an
/// inconsistent report.
pub fn build(
    document: &Document,
    issues: &[Issue],
    actions: &[RemediationAction],
    warnings: &[AnalysisWarning],
    analysis_date: &str,
) -> Result<Report, EngineError> {
    for issue in issues {
        if document.resolve(issue.element).is_none() {
            return Err(EngineError::Invariant(format!(
                "issue {} references missing element ({})",
                issue.kind, issue.element
            )));
        }
    }

    let mut pages = Vec::with_capacity(document.pages.len());
    let mut page_weights = Vec::with_capacity(document.pages.len());

    for page in &document.pages {
        let page_issues: Vec<Issue> = issues
            .iter()
            .filter(|i| i.page == page.number)
            .cloned()
            .collect();
        let page_actions: Vec<&RemediationAction> = actions
            .iter()
            .filter(|a| a.element.page == page.number)
            .collect();

        let accessibility_score = score::page_score(&page_issues);
        let counts = page.counts();
        page_weights.push((accessibility_score, counts.total()));

        let manual_actions_remaining = page_issues
            .iter()
            .filter(|i| !i.status.is_resolved())
            .count();

        pages.push(PageReport {
            page_number: page.number,
            title: page.title.clone(),
            accessibility_score,
            elements_analyzed: counts,
            remediation: PageRemediation {
                automatic_fixes_applied: page_actions.len(),
                manual_actions_remaining,
                fixes_details: page_actions.iter().map(|a| fix_detail(a)).collect(),
            },
            issues: page_issues,
        });
    }

    let severity_count =
        |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();
    let manual_review_needed = issues.iter().filter(|i| !i.status.is_resolved()).count();

    let executive_summary = ExecutiveSummary {
        overall_score: score::document_score(&page_weights),
        total_issues: issues.len(),
        critical_issues: severity_count(Severity::Critical),
        high_issues: severity_count(Severity::High),
        medium_issues: severity_count(Severity::Medium),
        low_issues: severity_count(Severity::Low),
        fixes_applied: actions.len(),
        manual_review_needed,
    };

    Ok(Report {
        document_info: DocumentInfo {
            file_name: document.name.clone(),
            analysis_date: analysis_date.to_string(),
            total_pages: document.pages.len(),
        },
        executive_summary,
        pages,
        remediation_summary: RemediationSummary {
            automatic_fixes: actions.iter().map(fix_detail).collect(),
            manual_actions_needed: build_worklist(issues),
        },
        analysis_warnings: warnings.iter().map(|w| w.to_string()).collect(),
    })
}

/// Group every non-resolved issue by kind into the manual worklist.
/// Placeholder-fixed issues stay on the list: the placeholder satisfied the
/// letter of the check, not the intent.
fn build_worklist(issues: &[Issue]) -> Vec<ManualAction> {
    let mut groups: BTreeMap<IssueKind, Vec<&Issue>> = BTreeMap::new();
    for issue in issues.iter().filter(|i| !i.status.is_resolved()) {
        groups.entry(issue.kind).or_default().push(issue);
    }

    let mut worklist: Vec<ManualAction> = groups
        .into_iter()
        .map(|(kind, group)| {
            let meta = rule_meta(kind);
            let pages: BTreeSet<usize> = group.iter().map(|i| i.page).collect();
            let priority = group
                .iter()
                .map(|i| i.priority)
                .min_by_key(|p| p.rank())
                .unwrap_or(Priority::ShouldFix);
            let total_minutes: f64 = group
                .iter()
                .map(|i| estimated_minutes(i.estimated_time))
                .sum();

            ManualAction {
                issue_type: kind.label(),
                count: group.len(),
                pages_affected: pages.into_iter().collect(),
                priority,
                total_estimated_time: format!("{:.0} minutes", total_minutes),
                wcag_criterion: meta.wcag_criterion,
                action_needed: meta.required_action,
            }
        })
        .collect();

    worklist.sort_by(|a, b| {
        a.priority
            .rank()
            .cmp(&b.priority.rank())
            .then(b.count.cmp(&a.count))
            .then(a.issue_type.cmp(&b.issue_type))
    });
    worklist
}

/// Serialize a report as pretty-printed JSON.
pub fn to_json(report: &Report) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

// =============================================================================
// Pretty format
// =============================================================================

/// Write a report in human-readable form to stdout.
pub fn write_pretty(report: &Report) {
    println!();
    print!("  {}", "accesscheck".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Document: ".dimmed());
    println!("{}", report.document_info.file_name);
    print!("  {}", "Analyzed: ".dimmed());
    println!(
        "{} ({} pages)",
        report.document_info.analysis_date, report.document_info.total_pages
    );
    println!();

    write_summary(&report.executive_summary);
    println!();

    for page in &report.pages {
        write_page(page);
    }

    if !report.remediation_summary.manual_actions_needed.is_empty() {
        write_worklist(&report.remediation_summary.manual_actions_needed);
        println!();
    }

    if !report.analysis_warnings.is_empty() {
        println!("  {} ({}):", "Warnings".dimmed(), report.analysis_warnings.len());
        for warning in &report.analysis_warnings {
            println!("    {}", warning.dimmed());
        }
        println!();
    }
}

fn write_summary(summary: &ExecutiveSummary) {
    print!("  Overall score: ");
    write_colored_score(summary.overall_score);
    println!("/100");

    println!(
        "  Issues: {} total ({} critical, {} high, {} medium, {} low)",
        summary.total_issues,
        summary.critical_issues,
        summary.high_issues,
        summary.medium_issues,
        summary.low_issues
    );
    println!(
        "  Fixes applied: {}  Manual review needed: {}",
        summary.fixes_applied, summary.manual_review_needed
    );
}

fn write_colored_score(score: i32) {
    match score {
        s if s >= 90 => print!("{}", s.to_string().green().bold()),
        s if s >= 80 => print!("{}", s.to_string().green()),
        s if s >= 60 => print!("{}", s.to_string().yellow()),
        s if s >= 40 => print!("{}", s.to_string().yellow().bold()),
        s => print!("{}", s.to_string().red()),
    }
}

fn write_page(page: &PageReport) {
    print!("  {}", format!("Page {}", page.page_number).bold());
    if let Some(title) = &page.title {
        print!("  {}", title.dimmed());
    }
    print!("  score: ");
    write_colored_score(page.accessibility_score);
    println!();

    for issue in &page.issues {
        write_severity_tag(&issue.severity);
        print!("  {:<22}", issue.kind.as_str().dimmed());
        println!("{}", issue.description);
        println!("            {}", format!("status: {}", issue.status).dimmed());
    }

    for fix in &page.remediation.fixes_details {
        println!("    {}  {}", "FIXED".green(), fix.description);
        if let Some(note) = &fix.note {
            println!("            {}", note.dimmed());
        }
    }
    println!();
}

fn write_severity_tag(severity: &Severity) {
    match severity {
        Severity::Critical => print!("    {} ", "CRIT ".red().bold()),
        Severity::High => print!("    {} ", "HIGH ".red()),
        Severity::Medium => print!("    {} ", "MED  ".yellow()),
        Severity::Low => print!("    {} ", "LOW  ".blue()),
    }
}

fn write_worklist(actions: &[ManualAction]) {
    println!("  {}", "Manual actions needed:".bold());
    for action in actions {
        let priority = match action.priority {
            Priority::MustFix => action.priority.as_str().red().bold(),
            Priority::ShouldFix => action.priority.as_str().yellow(),
            Priority::CouldFix => action.priority.as_str().blue(),
        };
        println!(
            "    {}  {} x{} on page(s) {}  ~{}",
            priority,
            action.issue_type,
            action.count,
            action
                .pages_affected
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            action.total_estimated_time
        );
        println!(
            "            {}",
            format!("{} - {}", action.wcag_criterion, action.action_needed).dimmed()
        );
    }
}
