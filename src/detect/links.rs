//! Link-text checks.
//!
//! "Click here" tells a screen-reader user nothing when links are read out
//! of context. Flagged links carry up to three replacement suggestions
//! derived from the link target and the nearest heading, so the planner can
//! fix them without a round trip to the assistant.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{truncate, Element, Link, Page};

use super::{Finding, IssueKind, Severity};

/// Rank of this detector in the fixed run order.
pub const RANK: u8 = 1;

/// Vague phrases that say nothing about the destination.
pub const VAGUE_PHRASES: &[&str] = &[
    "click here",
    "here",
    "read more",
    "more info",
    "more",
    "link",
    "download",
];

/// File extensions worth calling out in a suggestion.
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx"];

lazy_static! {
    /// Link text that is just a URL pasted in.
    static ref BARE_URL: Regex = Regex::new(r"(?i)^(https?://|www\.)\S+$").unwrap();
}

/// Whether visible link text fails the purpose check.
pub fn is_vague_link_text(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    VAGUE_PHRASES.contains(&normalized.as_str()) || BARE_URL.is_match(normalized.as_str())
}

/// Whether a replacement candidate is good enough to apply automatically:
/// non-empty, not itself vague, and long enough to carry meaning.
pub fn passes_quality(candidate: &str) -> bool {
    let trimmed = candidate.trim();
    trimmed.chars().count() > 4 && !is_vague_link_text(trimmed)
}

/// Scan a page's links for vague visible text.
pub fn detect_link_text(page: &Page, max_suggestions: usize) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (position, element) in page.elements.iter().enumerate() {
        let link = match element {
            Element::Link(link) => link,
            _ => continue,
        };
        // Malformed links are reported by model validation and skipped here.
        if link.target.trim().is_empty() {
            continue;
        }
        if !is_vague_link_text(&link.text) {
            continue;
        }
        let element_ref = match page.element_ref(position) {
            Some(r) => r,
            None => continue,
        };

        let context = page.heading_context(position);
        let suggestions = derive_suggestions(link, context, max_suggestions);
        let shown = truncate(link.text.trim(), 50);

        findings.push(Finding {
            kind: IssueKind::VagueLinkText,
            severity: Severity::Medium,
            page: page.number,
            element: element_ref,
            position,
            rank: RANK,
            description: format!("Link {} has vague text: '{}'", element_ref.index, shown),
            current_state: format!("Link text: '{}'", shown),
            suggestions,
        });
    }

    findings
}

/// Build replacement candidates from the link target and heading context.
/// Candidates that would themselves fail the quality bar are dropped.
pub fn derive_suggestions(link: &Link, context: Option<&str>, max: usize) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Some((name, extension)) = target_document_name(&link.target) {
        match extension {
            Some(ext) => candidates.push(format!("View {} ({})", name, ext.to_uppercase())),
            None => candidates.push(format!("View {}", name)),
        }
    }

    if let Some(ctx) = context {
        let ctx = truncate(ctx.trim(), 60);
        if !ctx.is_empty() {
            candidates.push(format!("Learn more about {}", ctx));
        }
    }

    if let Some(host) = target_host(&link.target) {
        candidates.push(format!("Visit {}", host));
    }

    candidates.retain(|c| passes_quality(c));
    candidates.dedup();
    candidates.truncate(max);
    candidates
}

/// Humanized last path segment of a target URL, plus a recognized document
/// extension when present. Returns `None` when the target has no usable
/// path component.
fn target_document_name(target: &str) -> Option<(String, Option<String>)> {
    let stripped = strip_scheme(target);
    let without_fragment = stripped.split(['#', '?']).next().unwrap_or("");
    let mut parts = without_fragment.split('/').filter(|p| !p.is_empty());
    // First part is the host; the segment of interest is the last one after it.
    parts.next()?;
    let segment = parts.last()?;

    let (stem, extension) = match segment.rsplit_once('.') {
        Some((stem, ext)) if DOCUMENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => {
            (stem, Some(ext.to_lowercase()))
        }
        _ => (segment, None),
    };

    let name = stem
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        return None;
    }
    Some((name, extension))
}

/// Host portion of a target URL, if any.
fn target_host(target: &str) -> Option<String> {
    let stripped = strip_scheme(target);
    let host = stripped.split(['/', '#', '?']).next().unwrap_or("");
    if host.is_empty() || !host.contains('.') {
        return None;
    }
    Some(host.to_string())
}

fn strip_scheme(target: &str) -> &str {
    let trimmed = target.trim();
    trimmed
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Heading;

    fn link(text: &str, target: &str) -> Link {
        Link {
            text: text.to_string(),
            target: target.to_string(),
        }
    }

    fn page_with(elements: Vec<Element>) -> Page {
        Page {
            number: 1,
            title: Some("Resources".to_string()),
            elements,
        }
    }

    #[test]
    fn test_vague_phrases_detected() {
        assert!(is_vague_link_text("Click Here"));
        assert!(is_vague_link_text("  read more "));
        assert!(is_vague_link_text("https://example.edu/page"));
        assert!(is_vague_link_text("www.example.edu"));
        assert!(!is_vague_link_text("2024 annual report"));
    }

    #[test]
    fn test_descriptive_link_passes() {
        let page = page_with(vec![Element::Link(link(
            "View the course syllabus",
            "https://example.edu/syllabus.pdf",
        ))]);
        assert!(detect_link_text(&page, 3).is_empty());
    }

    #[test]
    fn test_vague_link_flagged_with_suggestions() {
        let page = page_with(vec![
            Element::Heading(Heading {
                level: 2,
                text: "Reading List".to_string(),
            }),
            Element::Link(link(
                "click here",
                "https://example.edu/reports/annual-report-2024.pdf",
            )),
        ]);
        let findings = detect_link_text(&page, 3);
        assert_eq!(findings.len(), 1);
        let f = &findings[0];
        assert_eq!(f.kind, IssueKind::VagueLinkText);
        assert_eq!(f.severity, Severity::Medium);
        assert_eq!(f.suggestions[0], "View annual report 2024 (PDF)");
        assert!(f.suggestions.contains(&"Learn more about Reading List".to_string()));
    }

    #[test]
    fn test_suggestions_capped_and_quality_filtered() {
        let suggestions = derive_suggestions(
            &link("here", "https://example.edu/advising"),
            Some("Next Steps"),
            2,
        );
        assert!(suggestions.len() <= 2);
        assert!(suggestions.iter().all(|s| passes_quality(s)));
        assert_eq!(suggestions[0], "View advising");
    }

    #[test]
    fn test_target_without_path_uses_host() {
        let suggestions = derive_suggestions(&link("more", "https://example.edu"), None, 3);
        assert_eq!(suggestions, vec!["Visit example.edu".to_string()]);
    }

    #[test]
    fn test_empty_target_skipped() {
        let page = page_with(vec![Element::Link(link("click here", "  "))]);
        assert!(detect_link_text(&page, 3).is_empty());
    }

    #[test]
    fn test_quality_bar() {
        assert!(!passes_quality("here"));
        assert!(!passes_quality("link"));
        assert!(!passes_quality(""));
        assert!(!passes_quality("https://example.edu/a"));
        assert!(passes_quality("View annual report 2024 (PDF)"));
    }
}
