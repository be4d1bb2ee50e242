//! Font-size checks for text blocks.
//!
//! Text below the configured floor is hard to read on projected slides.
//! Severity scales with the distance below the floor; blocks with no
//! declared size are skipped.

use crate::model::{truncate, Element, Page};

use super::{Finding, IssueKind, Severity};

/// Rank of this detector in the fixed run order.
pub const RANK: u8 = 5;

/// Scan a page's text blocks for undersized fonts.
///
/// `min_pt` is the accepted floor; sizes below `severe_pt` are flagged
/// medium, the rest low.
pub fn detect_small_fonts(page: &Page, min_pt: f32, severe_pt: f32) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (position, element) in page.elements.iter().enumerate() {
        let block = match element {
            Element::TextBlock(block) => block,
            _ => continue,
        };
        let size = match block.font_size_pt {
            Some(size) if size > 0.0 => size,
            _ => continue,
        };
        if size >= min_pt {
            continue;
        }
        let element_ref = match page.element_ref(position) {
            Some(r) => r,
            None => continue,
        };

        let severity = if size < severe_pt {
            Severity::Medium
        } else {
            Severity::Low
        };

        findings.push(Finding {
            kind: IssueKind::SmallFont,
            severity,
            page: page.number,
            element: element_ref,
            position,
            rank: RANK,
            description: format!(
                "Text uses {}pt font, below the {}pt minimum",
                size, min_pt
            ),
            current_state: format!("{}pt at '{}'", size, truncate(block.text.trim(), 50)),
            suggestions: Vec::new(),
        });
    }

    findings
}
