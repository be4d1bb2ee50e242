//! Heading-hierarchy checks.
//!
//! Skipped heading levels (h1 straight to h3) break the document outline
//! that screen readers navigate by. The tracker is threaded through pages
//! strictly in page order; the baseline resets to a synthetic level 0 at
//! each page start, so the expected level is always `last_seen + 1`.

use crate::model::{truncate, Element, Page};

use super::{Finding, IssueKind, Severity};

/// Rank of this detector in the fixed run order.
pub const RANK: u8 = 2;

/// Last-seen heading level, carried across one page at a time.
#[derive(Debug, Default)]
pub struct HeadingTracker {
    last_level: u8,
}

impl HeadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one page's headings in element order, resetting the baseline
    /// first. Malformed heading levels (outside 1-6) are skipped; model
    /// validation has already reported them.
    pub fn scan_page(&mut self, page: &Page) -> Vec<Finding> {
        self.last_level = 0;
        let mut findings = Vec::new();

        for (position, element) in page.elements.iter().enumerate() {
            let heading = match element {
                Element::Heading(heading) => heading,
                _ => continue,
            };
            if !(1..=6).contains(&heading.level) {
                continue;
            }
            let expected = self.last_level + 1;
            if heading.level > expected {
                if let Some(element_ref) = page.element_ref(position) {
                    findings.push(Finding {
                        kind: IssueKind::HeadingHierarchy,
                        severity: Severity::Medium,
                        page: page.number,
                        element: element_ref,
                        position,
                        rank: RANK,
                        description: format!(
                            "Heading level jumps from h{} to h{} (expected h{})",
                            self.last_level, heading.level, expected
                        ),
                        current_state: format!(
                            "Heading hierarchy: h{} → h{} at '{}'",
                            self.last_level,
                            heading.level,
                            truncate(heading.text.trim(), 50)
                        ),
                        suggestions: Vec::new(),
                    });
                }
            }
            // The level advances even past a violation.
            self.last_level = heading.level;
        }

        findings
    }
}
